//! Носитель в памяти: HashMap + опциональная байтовая квота.
//!
//! Квота учитывает суммарный размер значений (ключи не считаем) и позволяет
//! тестировать CapacityWrite без реального носителя. Перезапись ключа
//! учитывается как дельта: старое значение освобождается.

use std::collections::HashMap;

use super::{validate_key, Storage};
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemStorage {
    map: HashMap<String, Vec<u8>>,
    quota_bytes: Option<usize>,
    used_bytes: usize,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Носитель с байтовой квотой (аналог лимита browser-storage).
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Default::default()
        }
    }

    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Storage for MemStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        validate_key(key)?;
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        validate_key(key)?;
        let old = self.map.get(key).map(|v| v.len()).unwrap_or(0);
        let new_used = self.used_bytes - old + value.len();
        if let Some(q) = self.quota_bytes {
            if new_used > q {
                return Err(StoreError::CapacityWrite {
                    key: key.to_string(),
                });
            }
        }
        self.map.insert(key.to_string(), value.to_vec());
        self.used_bytes = new_used;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        if let Some(v) = self.map.remove(key) {
            self.used_bytes -= v.len();
        }
        Ok(())
    }
}
