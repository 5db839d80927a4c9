//! ring/manifest — персистентный манифест кольца.
//!
//! Хранится через тот же порт под фиксированным ключом (ring_manifest)
//! как JSON-объект {"version":1,"capacity":N,"key_prefix":"snapshot_"}.
//!
//! Назначение: переоткрытие кольца с другой ёмкостью ломает модульную
//! арифметику порядка выборки — такое открытие отклоняем (ManifestMismatch),
//! а не молча перенумеровываем слоты. Префикс фиксируем по той же причине:
//! со сменой префикса старые слоты становятся невидимыми.
//!
//! Манифест переживает clear(): clear сбрасывает данные, но не формат.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::RingConfig;
use crate::consts::{MANIFEST_KEY, MANIFEST_VERSION};
use crate::error::StoreError;
use crate::storage::Storage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingManifest {
    pub version: u32,
    pub capacity: u32,
    pub key_prefix: String,
}

impl RingManifest {
    pub fn new(capacity: u32, key_prefix: impl Into<String>) -> Self {
        Self {
            version: MANIFEST_VERSION,
            capacity,
            key_prefix: key_prefix.into(),
        }
    }
}

/// Прочитать манифест, если он есть и разбирается.
/// Битый JSON трактуется как отсутствие (с warn) — его перезапишет ensure.
pub fn load<S: Storage>(storage: &S) -> Result<Option<RingManifest>, StoreError> {
    let raw = match storage.get(MANIFEST_KEY)? {
        Some(v) => v,
        None => return Ok(None),
    };
    match serde_json::from_slice::<RingManifest>(&raw) {
        Ok(m) => Ok(Some(m)),
        Err(e) => {
            warn!("ring manifest is unreadable ({}), rewriting", e);
            Ok(None)
        }
    }
}

/// Проверить/записать манифест при открытии кольца.
pub(crate) fn ensure<S: Storage>(storage: &mut S, cfg: &RingConfig) -> Result<(), StoreError> {
    match load(storage)? {
        Some(m) => {
            if m.capacity != cfg.capacity {
                return Err(StoreError::ManifestMismatch {
                    field: "capacity",
                    stored: m.capacity.to_string(),
                    requested: cfg.capacity.to_string(),
                });
            }
            if m.key_prefix != cfg.key_prefix {
                return Err(StoreError::ManifestMismatch {
                    field: "key_prefix",
                    stored: m.key_prefix,
                    requested: cfg.key_prefix.clone(),
                });
            }
            // version пока одна; при v2 здесь появится миграция
            Ok(())
        }
        None => {
            let m = RingManifest::new(cfg.capacity, cfg.key_prefix.clone());
            let raw = serde_json::to_vec(&m)
                .map_err(|e| StoreError::io("encode ring manifest", std::io::Error::other(e)))?;
            storage.set(MANIFEST_KEY, &raw)?;
            Ok(())
        }
    }
}
