//! dataurl — кодек payload'ов формата data:URL.
//!
//! Захваченные кадры часто приходят как data:image/jpeg;base64,<...>;
//! экспорт галереи разворачивает их обратно в байты. Кольцу сам формат
//! безразличен (payload непрозрачен) — кодек живёт сбоку.

use base64::Engine;

/// Обернуть байты в data:URL с указанным MIME.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, b64)
}

/// Разобрать data:URL; возвращает (mime, байты).
/// None — не data:URL, не base64-вариант или битое тело.
pub fn decode(s: &str) -> Option<(String, Vec<u8>)> {
    let rest = s.strip_prefix("data:")?;
    let (meta, body) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(body.trim())
        .ok()?;
    Some((mime.to_string(), bytes))
}

/// Похоже на base64 data:URL?
pub fn is_data_url(s: &str) -> bool {
    s.starts_with("data:") && s.contains(";base64,")
}
