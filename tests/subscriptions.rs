//! Локальные подписки: события append/clear, отписка по Drop хэндла.

use anyhow::Result;
use std::sync::{Arc, Mutex};

use SnapRing::config::RingConfig;
use SnapRing::ring::RingStore;
use SnapRing::storage::MemStorage;
use SnapRing::subs::RingEvent;

fn ring(capacity: u32) -> RingStore<MemStorage> {
    let cfg = RingConfig::default().with_capacity(capacity);
    RingStore::open(MemStorage::new(), cfg).expect("open ring")
}

#[test]
fn append_and_clear_publish_events() -> Result<()> {
    let mut r = ring(3);
    let seen: Arc<Mutex<Vec<RingEvent>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    let _handle = r.subscribe(move |ev| {
        sink.lock().unwrap().push(ev.clone());
    });

    r.append(b"frame-1")?;
    r.append(b"frame-2")?;
    r.clear()?;

    let got = seen.lock().unwrap().clone();
    assert_eq!(
        got,
        vec![
            RingEvent::Append {
                slot: 1,
                len: 7,
                count: 1
            },
            RingEvent::Append {
                slot: 2,
                len: 7,
                count: 2
            },
            RingEvent::Clear,
        ]
    );
    Ok(())
}

#[test]
fn failed_append_publishes_nothing() -> Result<()> {
    let cfg = RingConfig::default().with_capacity(3);
    let mut r = RingStore::open(MemStorage::with_quota(80), cfg).expect("open ring");

    let seen: Arc<Mutex<Vec<RingEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let _handle = r.subscribe(move |ev| {
        sink.lock().unwrap().push(ev.clone());
    });

    assert!(r.append(&[b'x'; 4096]).unwrap_err().is_capacity());
    assert!(seen.lock().unwrap().is_empty());
    Ok(())
}

#[test]
fn drop_of_handle_unsubscribes() -> Result<()> {
    let mut r = ring(3);
    let seen: Arc<Mutex<Vec<RingEvent>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    let handle = r.subscribe(move |ev| {
        sink.lock().unwrap().push(ev.clone());
    });

    r.append(b"a")?;
    drop(handle);
    r.append(b"b")?;
    r.clear()?;

    assert_eq!(seen.lock().unwrap().len(), 1, "only the first append is seen");
    Ok(())
}

#[test]
fn two_subscribers_both_notified() -> Result<()> {
    let mut r = ring(3);
    let c1 = Arc::new(Mutex::new(0u32));
    let c2 = Arc::new(Mutex::new(0u32));

    let s1 = c1.clone();
    let _h1 = r.subscribe(move |_| *s1.lock().unwrap() += 1);
    let s2 = c2.clone();
    let _h2 = r.subscribe(move |_| *s2.lock().unwrap() += 1);

    r.append(b"a")?;
    assert_eq!(*c1.lock().unwrap(), 1);
    assert_eq!(*c2.lock().unwrap(), 1);
    Ok(())
}
