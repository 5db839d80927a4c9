use anyhow::Result;
use std::path::PathBuf;

use super::util::open_ring;

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let ring = open_ring(&path)?;
    let report = ring.check()?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("Ring check report:");
        println!("  capacity   = {}", report.capacity);
        match report.cursor {
            Some(c) => println!("  cursor     = {}", c),
            None => println!("  cursor     = (none)"),
        }
        println!("  count      = {}", report.count);
        println!("  occupied   = {}", report.occupied);
        println!("  missing    = {:?}", report.missing);
        println!("  stray      = {:?}", report.stray);
        println!("  consistent = {}", report.consistent);
    }
    Ok(())
}
