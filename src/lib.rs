#![allow(non_snake_case)]

// Базовые модули
pub mod consts;
pub mod config;
pub mod error;
pub mod metrics;
pub mod util;

// Порт хранения и реализации носителей
pub mod storage; // src/storage/{mod,mem,file}.rs

// Кольцевой стор снапшотов
pub mod ring; // src/ring/{mod,store,manifest,check}.rs

// Продьюсер с троттлингом и локальные подписки
pub mod producer;
pub mod subs;

// Кодек payload'ов формата data:URL
pub mod dataurl;

// Удобные реэкспорты
pub use config::{RingBuilder, RingConfig};
pub use error::StoreError;
pub use producer::{Offer, ThrottledAppender};
pub use ring::{CheckReport, RingManifest, RingStore};
pub use storage::{FileStorage, MemStorage, Storage};
pub use subs::{RingEvent, SubscriptionHandle};
