//! Продьюсер с троттлингом: минимальный интервал между попытками записи и
//! политика границы продьюсера для CapacityWrite (молча пропустить кадр,
//! опционально один повтор).
//!
//! Интервал обязателен: append не атомарен по под-записям, и дробить его
//! частыми вызовами нельзя (см. ring/store.rs). Дефолт 500 мс — разумный
//! темп покадрового захвата.

use log::warn;
use std::time::{Duration, Instant};

use crate::error::StoreError;
use crate::metrics::{record_append_retry, record_offer_skipped, record_offer_throttled};
use crate::ring::RingStore;
use crate::storage::Storage;

/// Исход одной попытки продьюсера.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// Записано в слот.
    Accepted { slot: u32 },
    /// Отклонено троттлингом (носитель не трогали).
    Throttled,
    /// Носитель отклонил запись; кадр пропущен.
    Skipped,
}

pub struct ThrottledAppender<S: Storage> {
    ring: RingStore<S>,
    min_interval: Duration,
    retry_once: bool,
    // Метка последней НЕтроттленной попытки: обновляется и при неудачной
    // записи — темп держим по попыткам, не по успехам.
    last_offer: Option<Instant>,
}

impl<S: Storage> ThrottledAppender<S> {
    pub fn new(ring: RingStore<S>) -> Self {
        let min_interval = Duration::from_millis(ring.config().append_throttle_ms);
        let retry_once = ring.config().append_retry;
        Self {
            ring,
            min_interval,
            retry_once,
            last_offer: None,
        }
    }

    pub fn ring(&self) -> &RingStore<S> {
        &self.ring
    }

    pub fn ring_mut(&mut self) -> &mut RingStore<S> {
        &mut self.ring
    }

    pub fn into_ring(self) -> RingStore<S> {
        self.ring
    }

    /// Предложить кадр. Внутри окна троттлинга → Throttled;
    /// CapacityWrite → Skipped (после опционального одного повтора);
    /// прочие ошибки — наверх.
    pub fn offer(&mut self, payload: &[u8]) -> Result<Offer, StoreError> {
        let now = Instant::now();
        if let Some(t) = self.last_offer {
            if now.duration_since(t) < self.min_interval {
                record_offer_throttled();
                return Ok(Offer::Throttled);
            }
        }
        self.last_offer = Some(now);

        match self.try_append(payload) {
            Ok(slot) => Ok(Offer::Accepted { slot }),
            Err(e) if e.is_capacity() => {
                warn!("capture skipped: {}", e);
                record_offer_skipped();
                Ok(Offer::Skipped)
            }
            Err(e) => Err(e),
        }
    }

    fn try_append(&mut self, payload: &[u8]) -> Result<u32, StoreError> {
        match self.ring.append(payload) {
            Err(e) if e.is_capacity() && self.retry_once => {
                record_append_retry();
                self.ring.append(payload)
            }
            other => other,
        }
    }
}
