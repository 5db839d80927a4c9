use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use SnapRing::dataurl;

use super::util::open_ring;

pub fn exec(path: PathBuf, out_dir: PathBuf, raw: bool) -> Result<()> {
    let ring = open_ring(&path)?;
    let items = ring.list_newest_first()?;
    fs::create_dir_all(&out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    for (pos, p) in items.iter().enumerate() {
        // data:URL разворачиваем в байты (если не --raw)
        let decoded = if raw {
            None
        } else {
            std::str::from_utf8(p).ok().and_then(dataurl::decode)
        };
        let (bytes, ext) = match &decoded {
            Some((mime, b)) => (b.as_slice(), ext_for_mime(mime)),
            None => (p.as_slice(), "bin"),
        };
        let out = out_dir.join(format!("snapshot-{:03}.{}", pos + 1, ext));
        fs::write(&out, bytes).with_context(|| format!("write {}", out.display()))?;
        println!("wrote {} ({} B)", out.display(), bytes.len());
    }

    println!("exported {} snapshot(s) to {}", items.len(), out_dir.display());
    Ok(())
}

fn ext_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "bin",
    }
}
