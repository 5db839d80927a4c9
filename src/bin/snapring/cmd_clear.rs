use anyhow::Result;
use std::path::PathBuf;

use super::util::open_ring;

pub fn exec(path: PathBuf) -> Result<()> {
    let mut ring = open_ring(&path)?;
    ring.clear()?;
    println!("cleared ring at {} (capacity={})", path.display(), ring.capacity());
    Ok(())
}
