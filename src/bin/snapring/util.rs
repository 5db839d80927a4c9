use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use SnapRing::ring::RingStore;
use SnapRing::storage::FileStorage;

/// Открыть существующее кольцо (манифест обязателен — см. `snapring init`).
pub fn open_ring(path: &Path) -> Result<RingStore<FileStorage>> {
    let storage = FileStorage::open_or_create(path)
        .with_context(|| format!("open storage at {}", path.display()))?;
    let ring = RingStore::open_existing(storage)
        .with_context(|| format!("open ring at {}", path.display()))?;
    Ok(ring)
}

/// Прочитать payload из файла либо из stdin.
pub fn read_payload(file: Option<PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(p) => std::fs::read(&p).with_context(|| format!("read {}", p.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("read stdin")?;
            Ok(buf)
        }
    }
}
