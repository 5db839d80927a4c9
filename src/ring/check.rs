//! ring/check — doctor-скан кольца: согласованность cursor/count и слотов.
//!
//! Скан строго read-only: ничего не чинит (list тоже не чинит — см.
//! store.rs). Отчёт:
//! - occupied — сколько слотов логического окна реально читается;
//! - missing  — индексы слотов окна без валидного payload;
//! - stray    — занятые слоты вне логического окна: payload есть, но
//!   cursor/count до него «не дотягиваются» (след разъезда под-записей
//!   после crash);
//! - consistent — окно полно, лишних слотов нет, курсор на месте.

use serde::Serialize;

use super::store::RingStore;
use crate::error::StoreError;
use crate::storage::Storage;

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub capacity: u32,
    pub cursor: Option<u32>,
    pub count: u32,
    pub occupied: u32,
    pub missing: Vec<u32>,
    pub stray: Vec<u32>,
    pub consistent: bool,
}

impl<S: Storage> RingStore<S> {
    /// Просканировать все N слотов и сопоставить с cursor/count.
    pub fn check(&self) -> Result<CheckReport, StoreError> {
        let n = self.cfg.capacity;
        let cursor = self.read_cursor()?;
        let count = self.read_count()?;

        // Логическое окно: count шагов назад от курсора (или точки заворота).
        let start = cursor.unwrap_or(n - 1);
        let mut in_window = vec![false; n as usize];
        let mut missing = Vec::new();
        let mut occupied = 0u32;
        for i in 0..count {
            let idx = (start + n - i) % n;
            in_window[idx as usize] = true;
            if self.storage.get(&self.cfg.slot_key(idx))?.is_some() {
                occupied += 1;
            } else {
                missing.push(idx);
            }
        }

        let mut stray = Vec::new();
        for idx in 0..n {
            if in_window[idx as usize] {
                continue;
            }
            if self.storage.get(&self.cfg.slot_key(idx))?.is_some() {
                stray.push(idx);
            }
        }

        let consistent = missing.is_empty()
            && stray.is_empty()
            && (count == 0 || cursor.is_some());

        Ok(CheckReport {
            capacity: n,
            cursor,
            count,
            occupied,
            missing,
            stray,
            consistent,
        })
    }
}
