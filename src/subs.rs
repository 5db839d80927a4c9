//! In-process subscriptions (live ring events).
//!
//! Scope:
//! - Local (in-process) pub/sub: the store publishes an event after each
//!   successful append and after clear.
//! - Drop of SubscriptionHandle unsubscribes.
//!
//! Notes:
//! - Callbacks are executed synchronously in the writer's call right after
//!   the operation completes. Keep callbacks fast and non-blocking; if you
//!   need async work, spawn a thread/task.
//! - The registry is owned by RingStore (one per store instance).
//! - This module does not depend on storage formats and can be reused.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

/// A single ring event emitted by the writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RingEvent {
    /// Successful append: slot written, payload size, resulting count.
    Append { slot: u32, len: usize, count: u32 },
    /// The ring was cleared.
    Clear,
}

pub type Callback = Arc<dyn Fn(&RingEvent) + Send + Sync + 'static>;

#[derive(Default)]
struct SubInner {
    next_id: u64,
    subs: HashMap<u64, Callback>,
}

/// Subscription registry (held inside RingStore).
pub struct SubRegistry {
    inner: Mutex<SubInner>,
}

impl SubRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(SubInner::default()),
        })
    }

    /// Subscribe for ring events. Returns a handle; dropping it unsubscribes.
    pub fn subscribe(self: &Arc<Self>, cb: Callback) -> SubscriptionHandle {
        let mut g = self.inner.lock().unwrap();
        let id = g.next_id;
        g.next_id = g.next_id.wrapping_add(1);
        g.subs.insert(id, cb);
        drop(g);
        SubscriptionHandle {
            id,
            reg: Arc::downgrade(self),
        }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, ev: &RingEvent) {
        let callbacks: Vec<Callback> = {
            let g = self.inner.lock().unwrap();
            g.subs.values().cloned().collect()
        };
        // Execute outside the lock
        for cb in callbacks {
            cb(ev);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().unwrap().subs.len()
    }

    fn unsubscribe(&self, id: u64) {
        let mut g = self.inner.lock().unwrap();
        g.subs.remove(&id);
    }
}

/// RAII-handle: keeps the subscription alive, unsubscribes on Drop.
pub struct SubscriptionHandle {
    id: u64,
    reg: Weak<SubRegistry>,
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(reg) = self.reg.upgrade() {
            reg.unsubscribe(self.id);
        }
    }
}
