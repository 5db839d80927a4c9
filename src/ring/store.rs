//! ring/store — ядро кольцевого стора: append / list_newest_first / clear.
//!
//! Семантика:
//! - append: next = (cursor + 1) % N; payload → слот next; cursor = next;
//!   count = min(count + 1, N). Возвращает индекс записанного слота.
//!   Пустое кольцо стартует с cursor = 0, то есть первый append ложится
//!   в слот 1, а слот 0 пишется на N-м заходе.
//! - list_newest_first: от cursor назад по модулю N, count шагов;
//!   отсутствующий/битый слот молча пропускается (absence, не ошибка).
//! - clear: удаляет все N слотов (занятые и нет) + ключи cursor/count;
//!   идемпотентен. Манифест clear переживает.
//!
//! Атомарность: append состоит из трёх под-записей (payload, cursor, count).
//! При отказе носителя видимое состояние остаётся прежним: старый payload
//! целевого слота читается до перезаписи и возвращается best-effort, если
//! упала одна из последующих под-записей. Разъезд cursor/count после crash
//! между под-записями здесь не чинится — list пропускает дыры, check.rs
//! репортит.

use log::{debug, warn};
use std::sync::Arc;

use crate::config::RingConfig;
use crate::consts::MAX_CAPACITY;
use crate::error::StoreError;
use crate::metrics::{
    record_append, record_append_capacity_error, record_append_overwrite, record_clear,
    record_list_call, record_list_slot_missing,
};
use crate::storage::{validate_key, Storage};
use crate::subs::{RingEvent, SubRegistry, SubscriptionHandle};
use crate::util::{encode_ascii_u32, parse_ascii_u32};

use super::manifest;

pub struct RingStore<S: Storage> {
    pub(crate) storage: S,
    pub(crate) cfg: RingConfig,
    // Производные ключи считаем один раз при открытии.
    pub(crate) index_key: String,
    pub(crate) count_key: String,
    subs: Arc<SubRegistry>,
}

impl<S: Storage> std::fmt::Debug for RingStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingStore")
            .field("cfg", &self.cfg)
            .field("index_key", &self.index_key)
            .field("count_key", &self.count_key)
            .finish_non_exhaustive()
    }
}

impl<S: Storage> RingStore<S> {
    /// Открыть кольцо поверх носителя с явной конфигурацией.
    ///
    /// Пишет манифест при первом открытии; несовпадение ёмкости/префикса
    /// с уже записанным манифестом — ManifestMismatch.
    pub fn open(storage: S, cfg: RingConfig) -> Result<Self, StoreError> {
        if cfg.capacity == 0 || cfg.capacity > MAX_CAPACITY {
            return Err(StoreError::InvalidCapacity {
                capacity: cfg.capacity,
            });
        }
        // Префикс должен давать валидные ключи носителя.
        validate_key(&cfg.slot_key(0))?;

        let mut ring = Self {
            index_key: cfg.index_key(),
            count_key: cfg.count_key(),
            storage,
            cfg,
            subs: SubRegistry::new(),
        };
        manifest::ensure(&mut ring.storage, &ring.cfg)?;
        Ok(ring)
    }

    /// Открыть уже инициализированное кольцо: ёмкость и префикс берутся
    /// из манифеста, остальные настройки — из ENV/дефолтов.
    pub fn open_existing(storage: S) -> Result<Self, StoreError> {
        let m = manifest::load(&storage)?.ok_or(StoreError::ManifestMissing)?;
        let cfg = RingConfig::from_env()
            .with_capacity(m.capacity)
            .with_key_prefix(m.key_prefix);
        Self::open(storage, cfg)
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.cfg.capacity
    }

    #[inline]
    pub fn config(&self) -> &RingConfig {
        &self.cfg
    }

    /// Число занятых слотов (битое значение счётчика трактуется как 0).
    pub fn len(&self) -> Result<u32, StoreError> {
        self.read_count()
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Курсор записи (None — кольцо пусто либо ключ отсутствует/битый).
    pub fn cursor(&self) -> Result<Option<u32>, StoreError> {
        self.read_cursor()
    }

    /// Подписка на события кольца (append/clear). Drop хэндла отписывает.
    pub fn subscribe<F>(&self, cb: F) -> SubscriptionHandle
    where
        F: Fn(&RingEvent) + Send + Sync + 'static,
    {
        self.subs.subscribe(Arc::new(cb))
    }

    /// Доступ к носителю (read-only) — для сканов и тестов.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Забрать носитель обратно (кольцо при этом разбирается).
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Записать payload в следующий слот кольца. Возвращает индекс слота.
    pub fn append(&mut self, payload: &[u8]) -> Result<u32, StoreError> {
        if payload.is_empty() {
            return Err(StoreError::EmptyPayload);
        }
        let n = self.cfg.capacity;
        let prev_cursor = self.read_cursor()?;
        let count = self.read_count()?;
        let next = (prev_cursor.unwrap_or(0) + 1) % n;
        let slot_key = self.cfg.slot_key(next);

        // Старый payload целевого слота — для best-effort отката.
        let prev_payload = self.storage.get(&slot_key)?;
        let overwriting = count >= n;

        // (1) payload
        if let Err(e) = self.storage.set(&slot_key, payload) {
            if e.is_capacity() {
                record_append_capacity_error();
            }
            return Err(e);
        }

        // (2) cursor
        if let Err(e) = self.storage.set(&self.index_key, &encode_ascii_u32(next)) {
            self.rollback_slot(&slot_key, prev_payload.as_deref());
            if e.is_capacity() {
                record_append_capacity_error();
            }
            return Err(e);
        }

        // (3) count
        let new_count = (count + 1).min(n);
        if let Err(e) = self.storage.set(&self.count_key, &encode_ascii_u32(new_count)) {
            self.rollback_cursor(prev_cursor);
            self.rollback_slot(&slot_key, prev_payload.as_deref());
            if e.is_capacity() {
                record_append_capacity_error();
            }
            return Err(e);
        }

        record_append(payload.len());
        if overwriting {
            record_append_overwrite();
        }
        debug!(
            "append: slot={} len={} count={}{}",
            next,
            payload.len(),
            new_count,
            if overwriting { " (overwrite)" } else { "" }
        );
        self.subs.publish(&RingEvent::Append {
            slot: next,
            len: payload.len(),
            count: new_count,
        });
        Ok(next)
    }

    /// Все payload'ы от новых к старым (не более count штук).
    /// Отсутствующий/битый слот пропускается.
    pub fn list_newest_first(&self) -> Result<Vec<Vec<u8>>, StoreError> {
        record_list_call();
        let n = self.cfg.capacity;
        let count = self.read_count()?;
        if count == 0 {
            return Ok(Vec::new());
        }
        // Отсутствующий cursor при count > 0 — частичная порча; стартуем
        // с точки заворота N-1.
        let cursor = match self.read_cursor()? {
            Some(c) => c,
            None => {
                warn!("ring cursor missing with count={}, assuming wrap point", count);
                n - 1
            }
        };
        let mut out = Vec::with_capacity(count as usize);
        for i in 0..count {
            let idx = (cursor + n - i) % n;
            match self.storage.get(&self.cfg.slot_key(idx))? {
                Some(p) => out.push(p),
                None => {
                    record_list_slot_missing();
                    debug!("list: slot {} missing, skipping", idx);
                }
            }
        }
        Ok(out)
    }

    /// Удалить все N слотов и ключи cursor/count. Идемпотентен.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        for i in 0..self.cfg.capacity {
            self.storage.remove(&self.cfg.slot_key(i))?;
        }
        self.storage.remove(&self.index_key)?;
        self.storage.remove(&self.count_key)?;
        record_clear();
        self.subs.publish(&RingEvent::Clear);
        Ok(())
    }

    // ----------------- внутренняя логика -----------------

    pub(crate) fn read_cursor(&self) -> Result<Option<u32>, StoreError> {
        Ok(match self.storage.get(&self.index_key)? {
            Some(v) => match parse_ascii_u32(&v) {
                Some(c) => Some(c % self.cfg.capacity),
                None => {
                    warn!("ring cursor is unparseable, treating as absent");
                    None
                }
            },
            None => None,
        })
    }

    pub(crate) fn read_count(&self) -> Result<u32, StoreError> {
        Ok(self
            .storage
            .get(&self.count_key)?
            .and_then(|v| parse_ascii_u32(&v))
            .map(|c| c.min(self.cfg.capacity))
            .unwrap_or(0))
    }

    fn rollback_slot(&mut self, key: &str, prev: Option<&[u8]>) {
        let res = match prev {
            Some(v) => self.storage.set(key, v),
            None => self.storage.remove(key),
        };
        if let Err(e) = res {
            warn!("rollback of slot '{}' failed: {}", key, e);
        }
    }

    fn rollback_cursor(&mut self, prev: Option<u32>) {
        let res = match prev {
            Some(v) => self.storage.set(&self.index_key, &encode_ascii_u32(v)),
            None => self.storage.remove(&self.index_key),
        };
        if let Err(e) = res {
            warn!("rollback of ring cursor failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemStorage;

    /// Обёртка над MemStorage: отклоняет первые `remaining` записей
    /// по ключу `fail_key` (симуляция отказа носителя между под-записями).
    struct FailingSet {
        inner: MemStorage,
        fail_key: String,
        remaining: u32,
    }

    impl Storage for FailingSet {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
            if key == self.fail_key && self.remaining > 0 {
                self.remaining -= 1;
                return Err(StoreError::CapacityWrite {
                    key: key.to_string(),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    fn cfg(capacity: u32) -> RingConfig {
        RingConfig::default().with_capacity(capacity)
    }

    #[test]
    fn cursor_write_failure_rolls_back_payload() {
        let storage = FailingSet {
            inner: MemStorage::new(),
            fail_key: cfg(3).index_key(),
            remaining: 0,
        };
        let mut r = RingStore::open(storage, cfg(3)).unwrap();
        r.append(b"a").unwrap();
        r.append(b"b").unwrap();
        r.append(b"c").unwrap();
        let before = r.list_newest_first().unwrap();

        // Следующий append перезаписал бы слот с "a"; роняем запись курсора.
        r.storage.remaining = 1;
        let err = r.append(b"X").unwrap_err();
        assert!(err.is_capacity());

        assert_eq!(r.list_newest_first().unwrap(), before);
        assert_eq!(r.cursor().unwrap(), Some(0));
        assert_eq!(r.len().unwrap(), 3);
    }

    #[test]
    fn count_write_failure_rolls_back_cursor_and_payload() {
        let storage = FailingSet {
            inner: MemStorage::new(),
            fail_key: cfg(4).count_key(),
            remaining: 0,
        };
        let mut r = RingStore::open(storage, cfg(4)).unwrap();
        r.append(b"first").unwrap();

        r.storage.remaining = 1;
        let err = r.append(b"second").unwrap_err();
        assert!(err.is_capacity());

        assert_eq!(r.list_newest_first().unwrap(), vec![b"first".to_vec()]);
        assert_eq!(r.cursor().unwrap(), Some(1));
        assert_eq!(r.len().unwrap(), 1);
    }

    #[test]
    fn payload_write_failure_leaves_everything() {
        let storage = FailingSet {
            inner: MemStorage::new(),
            fail_key: cfg(3).slot_key(1),
            remaining: 1,
        };
        let mut r = RingStore::open(storage, cfg(3)).unwrap();
        let err = r.append(b"x").unwrap_err();
        assert!(err.is_capacity());
        assert!(r.is_empty().unwrap());
        assert_eq!(r.cursor().unwrap(), None);
    }

    #[test]
    fn zero_capacity_rejected() {
        let res = RingStore::open(MemStorage::new(), cfg(0));
        assert!(matches!(res, Err(StoreError::InvalidCapacity { .. })));
    }
}
