use SnapRing::config::{RingBuilder, RingConfig};

#[test]
fn defaults() {
    let cfg = RingConfig::default();
    assert_eq!(cfg.capacity, 20);
    assert_eq!(cfg.key_prefix, "snapshot_");
    assert_eq!(cfg.append_throttle_ms, 500);
    assert!(!cfg.append_retry);
}

#[test]
fn fluent_setters_override() {
    let cfg = RingConfig::default()
        .with_capacity(5)
        .with_key_prefix("cap_")
        .with_append_throttle_ms(0)
        .with_append_retry(true);
    assert_eq!(cfg.capacity, 5);
    assert_eq!(cfg.key_prefix, "cap_");
    assert_eq!(cfg.append_throttle_ms, 0);
    assert!(cfg.append_retry);
}

#[test]
fn builder_from_default() {
    let cfg = RingBuilder::from_default()
        .capacity(7)
        .key_prefix("frame_")
        .append_throttle_ms(100)
        .append_retry(true)
        .build();
    assert_eq!(cfg.capacity, 7);
    assert_eq!(cfg.key_prefix, "frame_");
    assert_eq!(cfg.append_throttle_ms, 100);
    assert!(cfg.append_retry);
}

#[test]
fn key_layout_matches_storage_keys() {
    // Раскладка ключей носителя: snapshot_<i> / snapshot_index / snapshot_count
    let cfg = RingConfig::default();
    assert_eq!(cfg.slot_key(0), "snapshot_0");
    assert_eq!(cfg.slot_key(19), "snapshot_19");
    assert_eq!(cfg.index_key(), "snapshot_index");
    assert_eq!(cfg.count_key(), "snapshot_count");
}

#[test]
fn from_env_reads_sr_vars() {
    // Тест единственный читатель SR_* в этом процессе.
    std::env::set_var("SR_RING_CAPACITY", "7");
    std::env::set_var("SR_KEY_PREFIX", "cam_");
    std::env::set_var("SR_APPEND_THROTTLE_MS", "250");
    std::env::set_var("SR_APPEND_RETRY", "yes");

    let cfg = RingConfig::from_env();
    assert_eq!(cfg.capacity, 7);
    assert_eq!(cfg.key_prefix, "cam_");
    assert_eq!(cfg.append_throttle_ms, 250);
    assert!(cfg.append_retry);

    // Мусорные значения игнорируются (остаются дефолты)
    std::env::set_var("SR_RING_CAPACITY", "not-a-number");
    std::env::set_var("SR_KEY_PREFIX", "   ");
    std::env::set_var("SR_APPEND_RETRY", "0");
    let cfg = RingConfig::from_env();
    assert_eq!(cfg.capacity, 20);
    assert_eq!(cfg.key_prefix, "snapshot_");
    assert!(!cfg.append_retry);

    std::env::remove_var("SR_RING_CAPACITY");
    std::env::remove_var("SR_KEY_PREFIX");
    std::env::remove_var("SR_APPEND_THROTTLE_MS");
    std::env::remove_var("SR_APPEND_RETRY");
}
