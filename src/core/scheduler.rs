//! # Keyed, cancellable deferred calls.
//!
//! The indicator suspends in exactly two places: the auto-expiry delay
//! between enqueue and deferred dequeue, and the fade-out grace delay. Both
//! are modeled as explicit scheduled tasks keyed by purpose, so superseding a
//! timer (re-submission resets a request's expiry; a fresh show cancels a
//! pending hide) is a precise operation instead of a side effect of
//! reassigning a timer handle.
//!
//! ## Rules
//! - One pending timer per [`TimerKey`]: scheduling an occupied key cancels
//!   the previous timer.
//! - A fired callback runs at most once, and never with the registry lock
//!   held.
//! - All timers are children of one root [`CancellationToken`]; cancelling
//!   it detaches everything pending (used when the indicator is dropped).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::surface::Layer;

/// Purpose of a pending timer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum TimerKey {
    /// Auto-expiry of the request with this (sanitized) id.
    Expiry(String),
    /// Completion of a layer's fade-out.
    Fade(Layer),
}

struct Registration {
    generation: u64,
    token: CancellationToken,
}

/// Registry of pending timers, one slot per [`TimerKey`].
pub(crate) struct Scheduler {
    me: Weak<Scheduler>,
    timers: Mutex<HashMap<TimerKey, Registration>>,
    root: CancellationToken,
    generation: AtomicU64,
}

impl Scheduler {
    pub(crate) fn new(root: CancellationToken) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            timers: Mutex::new(HashMap::new()),
            root,
            generation: AtomicU64::new(0),
        })
    }

    /// Schedules `callback` to run after `delay`, superseding any pending
    /// timer under the same key.
    pub(crate) fn schedule<F>(&self, key: TimerKey, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, AtomicOrdering::Relaxed);
        let token = self.root.child_token();

        if let Some(old) = self.timers.lock().insert(
            key.clone(),
            Registration {
                generation,
                token: token.clone(),
            },
        ) {
            old.token.cancel();
        }

        let me = self.me.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    // The generation check is authoritative: even if a
                    // concurrent supersede lost the cancellation race, only
                    // the current registrant may fire.
                    let Some(scheduler) = me.upgrade() else { return };
                    if scheduler.complete(&key, generation) {
                        callback();
                    }
                }
            }
        });
    }

    /// Cancels the pending timer under `key`, if any.
    pub(crate) fn cancel(&self, key: &TimerKey) -> bool {
        match self.timers.lock().remove(key) {
            Some(reg) => {
                reg.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Number of pending timers (diagnostics).
    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.timers.lock().len()
    }

    /// Removes the registration for `key` iff it still belongs to
    /// `generation`. Returns whether the caller may fire.
    fn complete(&self, key: &TimerKey, generation: u64) -> bool {
        let mut timers = self.timers.lock();
        match timers.get(key) {
            Some(reg) if reg.generation == generation => {
                timers.remove(key);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn bump(counter: &Arc<AtomicU32>) -> impl FnOnce() + Send + 'static {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_once() {
        let sched = Scheduler::new(CancellationToken::new());
        let fired = Arc::new(AtomicU32::new(0));

        sched.schedule(
            TimerKey::Fade(Layer::Spinner),
            Duration::from_millis(10),
            bump(&fired),
        );
        assert_eq!(sched.pending(), 1);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(sched.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_supersedes_pending_timer() {
        let sched = Scheduler::new(CancellationToken::new());
        let fired = Arc::new(AtomicU32::new(0));

        sched.schedule(TimerKey::Expiry("x".into()), Duration::from_millis(10), bump(&fired));
        tokio::time::sleep(Duration::from_millis(5)).await;
        sched.schedule(TimerKey::Expiry("x".into()), Duration::from_millis(10), bump(&fired));

        // Past the first deadline: the superseded timer must not fire.
        tokio::time::sleep(Duration::from_millis(7)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let sched = Scheduler::new(CancellationToken::new());
        let fired = Arc::new(AtomicU32::new(0));

        sched.schedule(
            TimerKey::Fade(Layer::Overlay),
            Duration::from_millis(10),
            bump(&fired),
        );
        assert!(sched.cancel(&TimerKey::Fade(Layer::Overlay)));
        assert!(!sched.cancel(&TimerKey::Fade(Layer::Overlay)));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_root_cancellation_detaches_all_timers() {
        let root = CancellationToken::new();
        let sched = Scheduler::new(root.clone());
        let fired = Arc::new(AtomicU32::new(0));

        sched.schedule(TimerKey::Expiry("a".into()), Duration::from_millis(10), bump(&fired));
        root.cancel();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
