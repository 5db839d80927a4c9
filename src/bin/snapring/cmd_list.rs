use anyhow::Result;
use std::path::PathBuf;

use SnapRing::dataurl;

use super::util::open_ring;

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let ring = open_ring(&path)?;
    let items = ring.list_newest_first()?;

    if json {
        let arr: Vec<serde_json::Value> = items
            .iter()
            .enumerate()
            .map(|(pos, p)| {
                let is_data_url = std::str::from_utf8(p)
                    .map(dataurl::is_data_url)
                    .unwrap_or(false);
                serde_json::json!({
                    "pos": pos,
                    "len": p.len(),
                    "data_url": is_data_url,
                })
            })
            .collect();
        println!("{}", serde_json::to_string(&arr)?);
    } else {
        println!("{} snapshot(s), newest first:", items.len());
        for (pos, p) in items.iter().enumerate() {
            let kind = match std::str::from_utf8(p) {
                Ok(s) if dataurl::is_data_url(s) => "data-url",
                _ => "raw",
            };
            println!("  #{:<3} {:>9} B  {}", pos, p.len(), kind);
        }
    }
    Ok(())
}
