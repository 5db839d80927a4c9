//! Квота носителя: отказ записи не должен менять видимое состояние кольца.

use anyhow::Result;

use SnapRing::config::RingConfig;
use SnapRing::ring::RingStore;
use SnapRing::storage::MemStorage;

fn quota_ring(capacity: u32, quota_bytes: usize) -> RingStore<MemStorage> {
    let cfg = RingConfig::default().with_capacity(capacity);
    RingStore::open(MemStorage::with_quota(quota_bytes), cfg).expect("open ring")
}

#[test]
fn capacity_error_leaves_empty_slot_untouched() -> Result<()> {
    // Квоты хватает на манифест, служебные ключи и два кадра по 100 байт.
    let mut r = quota_ring(3, 400);
    r.append(&[b'a'; 100])?;
    r.append(&[b'b'; 100])?;

    let before_list = r.list_newest_first()?;
    let before_cursor = r.cursor()?;
    let before_count = r.len()?;

    // Кадр, который в квоту уже не лезет.
    let err = r.append(&[b'z'; 4096]).unwrap_err();
    assert!(err.is_capacity());

    assert_eq!(r.list_newest_first()?, before_list);
    assert_eq!(r.cursor()?, before_cursor);
    assert_eq!(r.len()?, before_count);
    Ok(())
}

#[test]
fn capacity_error_on_overwrite_keeps_old_payload() -> Result<()> {
    let mut r = quota_ring(3, 500);
    r.append(&[b'a'; 100])?;
    r.append(&[b'b'; 100])?;
    r.append(&[b'c'; 100])?;
    assert_eq!(r.len()?, 3);

    // Следующий append целится в слот с "a"; старый payload должен уцелеть.
    let err = r.append(&[b'z'; 4096]).unwrap_err();
    assert!(err.is_capacity());

    let after = r.list_newest_first()?;
    assert_eq!(after.len(), 3);
    assert_eq!(after[2], vec![b'a'; 100]);
    Ok(())
}

#[test]
fn append_recovers_after_clear() -> Result<()> {
    let mut r = quota_ring(3, 400);
    r.append(&[b'a'; 150])?;
    r.append(&[b'b'; 150])?;
    assert!(r.append(&[b'c'; 150]).unwrap_err().is_capacity());

    // После очистки место освободилось — запись снова проходит.
    r.clear()?;
    r.append(&[b'c'; 150])?;
    assert_eq!(r.len()?, 1);
    Ok(())
}
