//! Centralized configuration and builder for SnapRing.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - RingConfig::from_env() reads SR_* environment variables.
//! - Provide a simple RingBuilder that returns a RingConfig, which
//!   RingStore will consume.

use std::fmt;

use crate::consts::{
    COUNT_KEY_SUFFIX, DEFAULT_APPEND_THROTTLE_MS, DEFAULT_CAPACITY, DEFAULT_KEY_PREFIX,
    INDEX_KEY_SUFFIX,
};

/// Top-level configuration for a snapshot ring.
#[derive(Clone, Debug)]
pub struct RingConfig {
    /// Ring capacity N (number of retained snapshots).
    /// Env: SR_RING_CAPACITY (default 20)
    pub capacity: u32,

    /// Key prefix for slot/cursor/count keys in the storage medium.
    /// Env: SR_KEY_PREFIX (default "snapshot_")
    pub key_prefix: String,

    /// Minimum inter-append interval for the throttled producer, in ms.
    /// Env: SR_APPEND_THROTTLE_MS (default 500)
    pub append_throttle_ms: u64,

    /// Retry a capacity-rejected append once at the producer boundary.
    /// Env: SR_APPEND_RETRY (default false; "1|true|on|yes" => true)
    pub append_retry: bool,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            append_throttle_ms: DEFAULT_APPEND_THROTTLE_MS,
            append_retry: false,
        }
    }
}

impl RingConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SR_RING_CAPACITY") {
            if let Ok(n) = v.trim().parse::<u32>() {
                cfg.capacity = n;
            }
        }

        if let Ok(v) = std::env::var("SR_KEY_PREFIX") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.key_prefix = s.to_string();
            }
        }

        if let Ok(v) = std::env::var("SR_APPEND_THROTTLE_MS") {
            if let Ok(n) = v.trim().parse::<u64>() {
                cfg.append_throttle_ms = n;
            }
        }

        if let Ok(v) = std::env::var("SR_APPEND_RETRY") {
            let s = v.trim().to_ascii_lowercase();
            cfg.append_retry = s == "1" || s == "true" || s == "on" || s == "yes";
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_key_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_append_throttle_ms(mut self, ms: u64) -> Self {
        self.append_throttle_ms = ms;
        self
    }

    pub fn with_append_retry(mut self, on: bool) -> Self {
        self.append_retry = on;
        self
    }

    // ----- раскладка ключей -----

    /// Ключ слота с индексом idx.
    #[inline]
    pub fn slot_key(&self, idx: u32) -> String {
        format!("{}{}", self.key_prefix, idx)
    }

    /// Ключ курсора записи.
    #[inline]
    pub fn index_key(&self) -> String {
        format!("{}{}", self.key_prefix, INDEX_KEY_SUFFIX)
    }

    /// Ключ счётчика занятых слотов.
    #[inline]
    pub fn count_key(&self) -> String {
        format!("{}{}", self.key_prefix, COUNT_KEY_SUFFIX)
    }
}

impl fmt::Display for RingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RingConfig {{ capacity: {}, key_prefix: '{}', append_throttle_ms: {}, append_retry: {} }}",
            self.capacity, self.key_prefix, self.append_throttle_ms, self.append_retry,
        )
    }
}

/// Lightweight builder that produces a RingConfig.
#[derive(Clone, Debug)]
pub struct RingBuilder {
    cfg: RingConfig,
}

impl Default for RingBuilder {
    fn default() -> Self {
        // Start from env to keep SR_* overrides working, then allow explicit overrides.
        Self {
            cfg: RingConfig::from_env(),
        }
    }
}

impl RingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: RingConfig::default(),
        }
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.cfg.capacity = capacity;
        self
    }

    pub fn key_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.cfg.key_prefix = prefix.into();
        self
    }

    pub fn append_throttle_ms(mut self, ms: u64) -> Self {
        self.cfg.append_throttle_ms = ms;
        self
    }

    pub fn append_retry(mut self, on: bool) -> Self {
        self.cfg.append_retry = on;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> RingConfig {
        self.cfg
    }
}
