//! storage — порт хранения (синхронный KV по строковым ключам) и носители.
//!
//! Состав:
//! - Storage: трейт get/set/remove. Запись может быть отклонена носителем
//!   (квота/нет места) — это CapacityWrite, а не фатальная ошибка.
//! - MemStorage: in-memory носитель с опциональной байтовой квотой.
//! - FileStorage: файл-на-ключ с CRC-фреймами и эксклюзивным LOCK.
//!
//! &mut self на мутирующих операциях фиксирует правило «один логический
//! писатель» на уровне типов; многописательный режим потребовал бы внешней
//! взаимной блокировки вокруг append.

use crate::error::StoreError;

pub trait Storage {
    /// Прочитать значение по ключу (None — отсутствует или фрейм битый).
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Записать значение (перезапись допустима).
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Удалить ключ; отсутствие ключа — no-op.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

mod file;
mod mem;

pub use file::FileStorage;
pub use mem::MemStorage;

/// Валидация ключа: непустой, только [A-Za-z0-9._-]
/// (FileStorage отображает ключи в имена файлов).
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b'-');
    if !ok {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}
