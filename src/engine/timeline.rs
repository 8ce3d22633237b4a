//! Virtual-time timer queue
//!
//! Replaces the browser's `setTimeout` / `setInterval` pair with an explicit,
//! host-driven clock. Entries fire in due-time order; entries due at the same
//! instant fire in the order they were scheduled, so a callback always runs
//! strictly before anything it schedules with zero delay.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Milliseconds on the virtual clock
pub type Millis = u64;

/// Handle for a scheduled entry, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<E> {
    due: Millis,
    seq: u64,
    id: TimerId,
    /// Re-arm period for interval timers
    period: Option<Millis>,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    // Reversed so the max-heap pops the earliest (due, seq) first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Ordered queue of one-shot and recurring timer events
#[derive(Debug)]
pub struct Timeline<E> {
    now: Millis,
    next_seq: u64,
    next_id: u64,
    queue: BinaryHeap<Entry<E>>,
    cancelled: HashSet<TimerId>,
}

impl<E: Clone> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Timeline<E> {
    /// Create an empty timeline at time zero
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            next_id: 0,
            queue: BinaryHeap::new(),
            cancelled: HashSet::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of pending entries (cancelled ones excluded)
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|entry| !self.cancelled.contains(&entry.id))
            .count()
    }

    /// Check whether no entries are pending
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Schedule `event` to fire once, `delay` ms from now
    pub fn schedule(&mut self, delay: Millis, event: E) -> TimerId {
        let id = self.allocate_id();
        self.push(self.now + delay, id, None, event);
        id
    }

    /// Schedule `event` to fire every `period` ms, first after one period
    ///
    /// A zero period is raised to 1 ms so the queue always makes progress.
    pub fn schedule_interval(&mut self, period: Millis, event: E) -> TimerId {
        let period = period.max(1);
        let id = self.allocate_id();
        self.push(self.now + period, id, Some(period), event);
        id
    }

    /// Cancel a pending entry; returns false when the id is unknown or
    /// already fired
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if self.queue.iter().any(|entry| entry.id == id) {
            self.cancelled.insert(id)
        } else {
            false
        }
    }

    /// Pop the next entry due at or before `until`, moving the clock to its
    /// due time. Interval entries are re-armed before they are returned.
    pub fn pop_due(&mut self, until: Millis) -> Option<E> {
        loop {
            let due = self.queue.peek()?.due;
            if due > until {
                return None;
            }

            let entry = self.queue.pop()?;
            if self.cancelled.remove(&entry.id) {
                continue;
            }

            self.now = self.now.max(entry.due);
            if let Some(period) = entry.period {
                self.push(entry.due + period, entry.id, Some(period), entry.event.clone());
            }
            return Some(entry.event);
        }
    }

    /// Move the clock forward without firing anything
    ///
    /// The clock never runs backwards.
    pub fn set_now(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    fn allocate_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push(&mut self, due: Millis, id: TimerId, period: Option<Millis>, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due,
            seq,
            id,
            period,
            event,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(timeline: &mut Timeline<&'static str>, until: Millis) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some(event) = timeline.pop_due(until) {
            fired.push(event);
        }
        timeline.set_now(until);
        fired
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(300, "late");
        timeline.schedule(100, "early");

        assert_eq!(drain(&mut timeline, 500), vec!["early", "late"]);
        assert_eq!(timeline.now(), 500);
    }

    #[test]
    fn test_same_instant_keeps_insertion_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(50, "first");
        timeline.schedule(50, "second");
        timeline.schedule(50, "third");

        assert_eq!(drain(&mut timeline, 50), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_not_due_stays_queued() {
        let mut timeline = Timeline::new();
        timeline.schedule(300, "hide");

        assert!(drain(&mut timeline, 299).is_empty());
        assert_eq!(timeline.pending(), 1);
        assert_eq!(drain(&mut timeline, 300), vec!["hide"]);
    }

    #[test]
    fn test_interval_rearms() {
        let mut timeline = Timeline::new();
        timeline.schedule_interval(2000, "tick");

        assert_eq!(drain(&mut timeline, 6500), vec!["tick", "tick", "tick"]);
        assert_eq!(timeline.pending(), 1);
    }

    #[test]
    fn test_cancel_interval() {
        let mut timeline = Timeline::new();
        let id = timeline.schedule_interval(16, "counter");

        assert_eq!(drain(&mut timeline, 32).len(), 2);
        assert!(timeline.cancel(id));
        assert!(drain(&mut timeline, 1000).is_empty());
        assert!(timeline.is_idle());
    }

    #[test]
    fn test_cancel_unknown_id() {
        let mut timeline: Timeline<&'static str> = Timeline::new();
        let id = timeline.schedule(10, "once");
        drain(&mut timeline, 10);

        assert!(!timeline.cancel(id));
    }

    #[test]
    fn test_zero_period_is_raised() {
        let mut timeline = Timeline::new();
        timeline.schedule_interval(0, "spin");

        assert_eq!(drain(&mut timeline, 3).len(), 3);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut timeline: Timeline<&'static str> = Timeline::new();
        timeline.set_now(1000);
        timeline.set_now(10);
        assert_eq!(timeline.now(), 1000);
    }
}
