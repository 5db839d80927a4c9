use anyhow::Result;
use std::path::PathBuf;

use SnapRing::config::RingConfig;
use SnapRing::ring::RingStore;
use SnapRing::storage::FileStorage;

pub fn exec(path: PathBuf, capacity: u32, key_prefix: String) -> Result<()> {
    let storage = FileStorage::open_or_create(&path)?;
    let cfg = RingConfig::from_env()
        .with_capacity(capacity)
        .with_key_prefix(key_prefix);
    let ring = RingStore::open(storage, cfg)?;
    println!(
        "initialized ring at {} (capacity={}, key_prefix='{}')",
        path.display(),
        ring.capacity(),
        ring.config().key_prefix
    );
    Ok(())
}
