//! Псевдослучайный churn: инварианты кольца под потоком append/list/clear.

use anyhow::Result;
use std::collections::VecDeque;

use SnapRing::config::RingConfig;
use SnapRing::ring::RingStore;
use SnapRing::storage::MemStorage;

const CAPACITY: u32 = 8;
const STEPS: u32 = 2000;

#[test]
fn churn_keeps_invariants() -> Result<()> {
    let mut rng = oorandom::Rand32::new(0xC0FFEE);
    let cfg = RingConfig::default().with_capacity(CAPACITY);
    let mut r = RingStore::open(MemStorage::new(), cfg)?;

    // Эталонная модель: последние N payload'ов, новые в голове.
    let mut model: VecDeque<Vec<u8>> = VecDeque::new();
    let mut seq = 0u32;

    for step in 0..STEPS {
        if rng.rand_range(0..10) == 0 {
            r.clear()?;
            model.clear();
        } else {
            seq += 1;
            // Размер payload'а тоже псевдослучайный.
            let len = 1 + rng.rand_range(1..64) as usize;
            let mut payload = format!("frame-{}-", seq).into_bytes();
            payload.resize(payload.len() + len, b'.');
            r.append(&payload)?;
            model.push_front(payload);
            model.truncate(CAPACITY as usize);
        }

        let got = r.list_newest_first()?;
        let want: Vec<Vec<u8>> = model.iter().cloned().collect();
        assert_eq!(got, want, "mismatch at step {}", step);
        assert!(r.len()? <= CAPACITY);
        assert_eq!(r.len()? as usize, model.len());
    }

    let report = r.check()?;
    assert!(report.consistent, "ring must stay consistent after churn");
    Ok(())
}

#[test]
fn churn_with_quota_never_corrupts() -> Result<()> {
    // Квота в обрез: часть записей отваливается CapacityWrite, но кольцо
    // обязано оставаться согласованным, а list — совпадать с моделью.
    let mut rng = oorandom::Rand32::new(0xBADCAFE);
    let cfg = RingConfig::default().with_capacity(4);
    let mut r = RingStore::open(MemStorage::with_quota(700), cfg)?;

    let mut model: VecDeque<Vec<u8>> = VecDeque::new();
    let mut rejected = 0u32;

    for _ in 0..500 {
        let len = 1 + rng.rand_range(1..256) as usize;
        let payload = vec![b'x'; len];
        match r.append(&payload) {
            Ok(_) => {
                model.push_front(payload);
                model.truncate(4);
            }
            Err(e) => {
                assert!(e.is_capacity(), "only capacity errors are expected");
                rejected += 1;
            }
        }
        let want: Vec<Vec<u8>> = model.iter().cloned().collect();
        assert_eq!(r.list_newest_first()?, want);
    }

    assert!(rejected > 0, "quota must have rejected something");
    Ok(())
}

#[test]
fn metrics_accumulate() -> Result<()> {
    // Счётчики глобальные на процесс — сравниваем дельтами (>=), а не точно.
    use SnapRing::metrics::metrics_snapshot;

    let before = metrics_snapshot();
    let cfg = RingConfig::default().with_capacity(2);
    let mut r = RingStore::open(MemStorage::new(), cfg)?;
    r.append(b"a")?;
    r.append(b"b")?;
    r.append(b"c")?; // перезапись старейшего
    r.list_newest_first()?;
    r.clear()?;
    let after = metrics_snapshot();

    assert!(after.appends_total >= before.appends_total + 3);
    assert!(after.append_bytes_total >= before.append_bytes_total + 3);
    assert!(after.append_overwrites >= before.append_overwrites + 1);
    assert!(after.list_calls >= before.list_calls + 1);
    assert!(after.clears_total >= before.clears_total + 1);
    Ok(())
}
