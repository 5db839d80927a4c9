//! util — общие хелперы (кодек ASCII-десятичных значений cursor/count).
//!
//! Курсор и счётчик хранятся в носителе как десятичные ASCII-строки.
//! Дефектное значение трактуется как отсутствие, а не как ошибка.

/// Разобрать ASCII-десятичное u32 из байтов значения.
/// None — пустое/нечисловое значение.
#[inline]
pub fn parse_ascii_u32(v: &[u8]) -> Option<u32> {
    let s = std::str::from_utf8(v).ok()?;
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u32>().ok()
}

/// Закодировать u32 в ASCII-десятичную форму.
#[inline]
pub fn encode_ascii_u32(v: u32) -> Vec<u8> {
    v.to_string().into_bytes()
}
