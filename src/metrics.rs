//! Lightweight global metrics for SnapRing.
//!
//! Потокобезопасные атомарные счётчики для подсистем:
//! - Append (кольцо)
//! - Producer (троттлинг/пропуски)
//! - Listing
//! - Clear

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Append -----
static APPENDS_TOTAL: AtomicU64 = AtomicU64::new(0);
static APPEND_BYTES_TOTAL: AtomicU64 = AtomicU64::new(0);
static APPEND_OVERWRITES: AtomicU64 = AtomicU64::new(0);
static APPEND_CAPACITY_ERRORS: AtomicU64 = AtomicU64::new(0);
static APPEND_RETRIES: AtomicU64 = AtomicU64::new(0);

// ----- Producer -----
static OFFERS_THROTTLED: AtomicU64 = AtomicU64::new(0);
static OFFERS_SKIPPED: AtomicU64 = AtomicU64::new(0);

// ----- Listing -----
static LIST_CALLS: AtomicU64 = AtomicU64::new(0);
static LIST_SLOTS_MISSING: AtomicU64 = AtomicU64::new(0);

// ----- Clear -----
static CLEARS_TOTAL: AtomicU64 = AtomicU64::new(0);

#[inline]
pub fn record_append(bytes: usize) {
    APPENDS_TOTAL.fetch_add(1, Ordering::Relaxed);
    APPEND_BYTES_TOTAL.fetch_add(bytes as u64, Ordering::Relaxed);
}

#[inline]
pub fn record_append_overwrite() {
    APPEND_OVERWRITES.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_append_capacity_error() {
    APPEND_CAPACITY_ERRORS.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_append_retry() {
    APPEND_RETRIES.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_offer_throttled() {
    OFFERS_THROTTLED.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_offer_skipped() {
    OFFERS_SKIPPED.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_list_call() {
    LIST_CALLS.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_list_slot_missing() {
    LIST_SLOTS_MISSING.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn record_clear() {
    CLEARS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

/// Снимок всех счётчиков (для статуса/тестов).
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub appends_total: u64,
    pub append_bytes_total: u64,
    pub append_overwrites: u64,
    pub append_capacity_errors: u64,
    pub append_retries: u64,

    pub offers_throttled: u64,
    pub offers_skipped: u64,

    pub list_calls: u64,
    pub list_slots_missing: u64,

    pub clears_total: u64,
}

pub fn metrics_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        appends_total: APPENDS_TOTAL.load(Ordering::Relaxed),
        append_bytes_total: APPEND_BYTES_TOTAL.load(Ordering::Relaxed),
        append_overwrites: APPEND_OVERWRITES.load(Ordering::Relaxed),
        append_capacity_errors: APPEND_CAPACITY_ERRORS.load(Ordering::Relaxed),
        append_retries: APPEND_RETRIES.load(Ordering::Relaxed),

        offers_throttled: OFFERS_THROTTLED.load(Ordering::Relaxed),
        offers_skipped: OFFERS_SKIPPED.load(Ordering::Relaxed),

        list_calls: LIST_CALLS.load(Ordering::Relaxed),
        list_slots_missing: LIST_SLOTS_MISSING.load(Ordering::Relaxed),

        clears_total: CLEARS_TOTAL.load(Ordering::Relaxed),
    }
}

/// Сбросить все счётчики в ноль (для тестов).
pub fn reset_metrics() {
    APPENDS_TOTAL.store(0, Ordering::Relaxed);
    APPEND_BYTES_TOTAL.store(0, Ordering::Relaxed);
    APPEND_OVERWRITES.store(0, Ordering::Relaxed);
    APPEND_CAPACITY_ERRORS.store(0, Ordering::Relaxed);
    APPEND_RETRIES.store(0, Ordering::Relaxed);

    OFFERS_THROTTLED.store(0, Ordering::Relaxed);
    OFFERS_SKIPPED.store(0, Ordering::Relaxed);

    LIST_CALLS.store(0, Ordering::Relaxed);
    LIST_SLOTS_MISSING.store(0, Ordering::Relaxed);

    CLEARS_TOTAL.store(0, Ordering::Relaxed);
}
