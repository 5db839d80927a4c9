use anyhow::Result;
use std::path::PathBuf;

use super::util::open_ring;

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let ring = open_ring(&path)?;
    let count = ring.len()?;
    let cursor = ring.cursor()?;

    if json {
        let obj = serde_json::json!({
            "capacity": ring.capacity(),
            "count": count,
            "cursor": cursor,
            "key_prefix": ring.config().key_prefix,
        });
        println!("{}", serde_json::to_string(&obj)?);
    } else {
        println!("capacity   = {}", ring.capacity());
        println!("count      = {}", count);
        match cursor {
            Some(c) => println!("cursor     = {}", c),
            None => println!("cursor     = (none)"),
        }
        println!("key_prefix = '{}'", ring.config().key_prefix);
    }
    Ok(())
}
