//! # Ordered queue of outstanding busy requests.
//!
//! [`BusyQueue`] is the bookkeeping half of the indicator: which requests are
//! outstanding, in what order, and which of them have gone stale. It performs
//! no I/O and schedules nothing - the indicator facade owns the timers and
//! holds the queue under its mutex.
//!
//! ## Rules
//! - At most one entry per non-empty id: pushing a duplicate **replaces**
//!   the old entry (fresh expiry, new queue position at the tail).
//! - Anonymous (empty-id) entries coexist freely.
//! - The first entry's id doubles as the spinner's display label; insertion
//!   order carries no other meaning.
//! - Expiry uses `<=`: a request expiring exactly "now" is already stale.

use tokio::time::Instant;

use super::request::BusyRequest;

/// Ordered sequence of [`BusyRequest`] with replace-on-duplicate semantics.
#[derive(Debug, Default)]
pub struct BusyQueue {
    entries: Vec<BusyRequest>,
}

impl BusyQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a request, first removing any queued entry with the same
    /// non-empty id.
    ///
    /// Returns the replaced entry, if there was one.
    pub fn push(&mut self, req: BusyRequest) -> Option<BusyRequest> {
        let replaced = if req.id.is_empty() {
            None
        } else {
            self.remove(&req.id)
        };
        self.entries.push(req);
        replaced
    }

    /// Removes the first entry whose id matches.
    ///
    /// Empty ids never match (anonymous entries are only removed by the
    /// expiry sweep). Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<BusyRequest> {
        if id.is_empty() {
            return None;
        }
        let index = self.entries.iter().position(|r| r.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Removes and returns every entry whose expiry has passed.
    ///
    /// Covers timers that fired late and requests that were never
    /// explicitly stopped; safe to call any time, including on an empty
    /// queue.
    pub fn sweep_expired(&mut self, now: Instant) -> Vec<BusyRequest> {
        let mut swept = Vec::new();
        self.entries.retain(|r| {
            if r.expiry <= now {
                swept.push(r.clone());
                false
            } else {
                true
            }
        });
        swept
    }

    /// Unconditionally empties the queue, returning how many entries were
    /// dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    /// Cloned read-only view, in queue order.
    pub fn snapshot(&self) -> Vec<BusyRequest> {
        self.entries.clone()
    }

    /// Number of outstanding requests.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no requests are outstanding.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when at least one outstanding request demands the modal underlay.
    pub fn has_modal(&self) -> bool {
        self.entries.iter().any(|r| r.modal)
    }

    /// The oldest outstanding request (its id is the display label).
    pub fn first(&self) -> Option<&BusyRequest> {
        self.entries.first()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn req(id: &str, ttl_ms: u64, modal: bool) -> BusyRequest {
        BusyRequest {
            id: id.to_string(),
            expiry: Instant::now() + Duration::from_millis(ttl_ms),
            modal,
        }
    }

    #[test]
    fn test_push_replaces_same_id() {
        let mut q = BusyQueue::new();
        assert!(q.push(req("x", 5_000, false)).is_none());
        let replaced = q.push(req("x", 5_000, true));
        assert!(replaced.is_some());
        assert_eq!(q.len(), 1);
        assert!(q.has_modal());
    }

    #[test]
    fn test_anonymous_entries_coexist() {
        let mut q = BusyQueue::new();
        assert!(q.push(req("", 5_000, false)).is_none());
        assert!(q.push(req("", 5_000, false)).is_none());
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut q = BusyQueue::new();
        q.push(req("a", 5_000, false));
        assert!(q.remove("b").is_none());
        assert!(q.remove("").is_none());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_remove_empty_id_never_matches_anonymous() {
        let mut q = BusyQueue::new();
        q.push(req("", 5_000, false));
        assert!(q.remove("").is_none());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_sweep_uses_inclusive_deadline() {
        let mut q = BusyQueue::new();
        let now = Instant::now();
        q.push(BusyRequest {
            id: "edge".into(),
            expiry: now,
            modal: false,
        });
        q.push(req("live", 60_000, false));

        let swept = q.sweep_expired(now);
        assert_eq!(swept.len(), 1);
        assert_eq!(swept[0].id, "edge");
        assert_eq!(q.len(), 1);
        assert_eq!(q.first().unwrap().id, "live");
    }

    #[test]
    fn test_sweep_removes_all_stale_entries() {
        let mut q = BusyQueue::new();
        let now = Instant::now();
        q.push(req("a", 1, false));
        q.push(req("b", 2, true));
        q.push(req("c", 60_000, false));

        let swept = q.sweep_expired(now + Duration::from_millis(10));
        assert_eq!(swept.len(), 2);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_sweep_on_empty_queue_is_noop() {
        let mut q = BusyQueue::new();
        assert!(q.sweep_expired(Instant::now()).is_empty());
    }

    #[test]
    fn test_clear_reports_dropped_count() {
        let mut q = BusyQueue::new();
        q.push(req("a", 5_000, false));
        q.push(req("b", 5_000, true));
        assert_eq!(q.clear(), 2);
        assert!(q.is_empty());
        assert!(!q.has_modal());
    }

    #[test]
    fn test_first_is_oldest_surviving_entry() {
        let mut q = BusyQueue::new();
        q.push(req("first", 5_000, false));
        q.push(req("second", 5_000, false));
        assert_eq!(q.first().unwrap().id, "first");

        // Replacing the oldest entry moves it to the tail.
        q.push(req("first", 5_000, false));
        assert_eq!(q.first().unwrap().id, "second");
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let mut q = BusyQueue::new();
        q.push(req("a", 5_000, false));
        q.push(req("b", 5_000, false));
        let snap = q.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].id, "a");
        assert_eq!(snap[1].id, "b");
    }
}
