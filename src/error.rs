//! Типизированные ошибки порта хранения и кольца.
//!
//! Политика:
//! - CapacityWrite — носитель отклонил запись (квота/нет места). Не фатально:
//!   видимое состояние кольца (cursor/count, содержимое слотов при листинге)
//!   остаётся прежним, продьюсер вправе молча пропустить кадр.
//! - Отсутствующий слот при чтении ошибкой НЕ является — это absence,
//!   листинг его пропускает.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum StoreError {
    /// Носитель отклонил запись (квота исчерпана / нет места).
    CapacityWrite { key: String },
    /// Ошибка ввода-вывода нижнего слоя.
    Io { context: String, source: io::Error },
    /// Ключ вне допустимого алфавита [A-Za-z0-9._-].
    InvalidKey { key: String },
    /// Ёмкость кольца вне диапазона [1, MAX_CAPACITY].
    InvalidCapacity { capacity: u32 },
    /// Пустой payload в append.
    EmptyPayload,
    /// Кольцо не инициализировано (манифест отсутствует).
    ManifestMissing,
    /// Манифест кольца не совпал с запрошенной конфигурацией.
    ManifestMismatch {
        field: &'static str,
        stored: String,
        requested: String,
    },
}

impl StoreError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            context: context.into(),
            source,
        }
    }

    /// Это отказ носителя по месту/квоте?
    #[inline]
    pub fn is_capacity(&self) -> bool {
        matches!(self, StoreError::CapacityWrite { .. })
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::CapacityWrite { key } => {
                write!(f, "storage rejected write for key '{}' (capacity)", key)
            }
            StoreError::Io { context, source } => write!(f, "io error ({}): {}", context, source),
            StoreError::InvalidKey { key } => write!(f, "invalid storage key '{}'", key),
            StoreError::InvalidCapacity { capacity } => {
                write!(f, "invalid ring capacity {}", capacity)
            }
            StoreError::EmptyPayload => write!(f, "empty payload"),
            StoreError::ManifestMissing => {
                write!(f, "ring manifest not found (store not initialized)")
            }
            StoreError::ManifestMismatch {
                field,
                stored,
                requested,
            } => write!(
                f,
                "ring manifest mismatch: {} stored={} requested={}",
                field, stored, requested
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
