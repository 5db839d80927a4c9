use anyhow::Result;
use std::path::PathBuf;

use SnapRing::dataurl;

use super::util::{open_ring, read_payload};

pub fn exec(path: PathBuf, file: Option<PathBuf>, data_url: bool, mime: String) -> Result<()> {
    let mut ring = open_ring(&path)?;
    let payload = read_payload(file)?;
    let payload = if data_url {
        dataurl::encode(&mime, &payload).into_bytes()
    } else {
        payload
    };
    let slot = ring.append(&payload)?;
    println!(
        "OK slot={} ({} B, count={}/{})",
        slot,
        payload.len(),
        ring.len()?,
        ring.capacity()
    );
    Ok(())
}
