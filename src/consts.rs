//! Общие константы: раскладка ключей кольца, дефолты, формат value-фрейма FileStorage.

// -------- Ключи кольца --------
// Раскладка ключей носителя: <prefix><idx> — слот, <prefix>index — курсор,
// <prefix>count — число занятых слотов. Манифест живёт под фиксированным
// ключом (не зависит от префикса — иначе его нечем найти).
pub const DEFAULT_KEY_PREFIX: &str = "snapshot_";
pub const INDEX_KEY_SUFFIX: &str = "index";
pub const COUNT_KEY_SUFFIX: &str = "count";
pub const MANIFEST_KEY: &str = "ring_manifest";

// -------- Дефолты кольца --------
pub const DEFAULT_CAPACITY: u32 = 20;
pub const MAX_CAPACITY: u32 = 65_536;
pub const DEFAULT_APPEND_THROTTLE_MS: u64 = 500;

// -------- Манифест --------
pub const MANIFEST_VERSION: u32 = 1;

// -------- FileStorage --------
// Формат value-файла (LE):
// [MAGIC4="SR1V"][len u32][crc32 u32] + payload (len байт)
// CRC считается по payload; битый фрейм читается как отсутствие значения.
pub const VALUE_MAGIC: &[u8; 4] = b"SR1V";
pub const VALUE_HDR_SIZE: usize = 12;
pub const VALUE_FILE_EXT: &str = "sr1";
pub const LOCK_FILE: &str = "LOCK";
