// History store - visited entries with a back/forward cursor
use crate::model::{Coordinates, NavigationEntry, NavigationTarget};
use tracing::debug;

/// Source of wall-clock time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Change notification delivered to subscribers after the store commits it.
#[derive(Clone, Debug, PartialEq)]
pub enum HistoryEvent {
    Recorded(NavigationEntry),
    Back(NavigationEntry),
    Forward(NavigationEntry),
    Cleared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&HistoryEvent)>;

pub struct HistoryStore {
    entries: Vec<NavigationEntry>,
    cursor: Option<usize>,
    next_id: u64,
    last_timestamp: i64,
    clock: Box<dyn Clock>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            next_id: 1,
            last_timestamp: i64::MIN,
            clock: Box::new(clock),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn record(
        &mut self,
        target: NavigationTarget,
        coordinates: Option<Coordinates>,
    ) -> NavigationEntry {
        // Remove any forward history when navigating from the middle
        if let Some(cursor) = self.cursor {
            let discarded = self.entries.len() - (cursor + 1);
            if discarded > 0 {
                debug!(discarded, "Truncating forward history");
            }
            self.entries.truncate(cursor + 1);
        }

        let timestamp = self.clock.now_millis().max(self.last_timestamp);
        self.last_timestamp = timestamp;

        let entry = NavigationEntry::new(self.next_id, target, timestamp, coordinates);
        self.next_id += 1;

        self.entries.push(entry.clone());
        self.cursor = Some(self.entries.len() - 1);

        self.notify(&HistoryEvent::Recorded(entry.clone()));
        entry
    }

    pub fn back(&mut self) -> Option<NavigationEntry> {
        if !self.can_go_back() {
            return None;
        }
        let cursor = self.cursor? - 1;
        self.cursor = Some(cursor);
        let entry = self.entries[cursor].clone();
        debug!(cursor, id = entry.id(), "History back");
        self.notify(&HistoryEvent::Back(entry.clone()));
        Some(entry)
    }

    pub fn forward(&mut self) -> Option<NavigationEntry> {
        if !self.can_go_forward() {
            return None;
        }
        let cursor = self.cursor? + 1;
        self.cursor = Some(cursor);
        let entry = self.entries[cursor].clone();
        debug!(cursor, id = entry.id(), "History forward");
        self.notify(&HistoryEvent::Forward(entry.clone()));
        Some(entry)
    }

    pub fn current(&self) -> Option<&NavigationEntry> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    /// Empties the store. Entry ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.notify(&HistoryEvent::Cleared);
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers a listener called synchronously after every committed change.
    pub fn subscribe(&mut self, listener: impl FnMut(&HistoryEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: &HistoryEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TargetRef;
    use proptest::prelude::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone)]
    struct ManualClock(Rc<Cell<i64>>);

    impl Clock for ManualClock {
        fn now_millis(&self) -> i64 {
            self.0.get()
        }
    }

    fn scene(id: i64) -> NavigationTarget {
        NavigationTarget::Scene(TargetRef::new(id))
    }

    fn ids(store: &HistoryStore) -> Vec<i64> {
        store.entries().iter().map(|e| e.target().id()).collect()
    }

    #[test]
    fn test_record_moves_cursor_to_tail() {
        let mut store = HistoryStore::new();
        for id in 0..4 {
            store.record(scene(id), None);
            assert_eq!(store.cursor(), Some(store.len() - 1));
            assert!(!store.can_go_forward());
        }
        assert!(store.can_go_back());
    }

    #[test]
    fn test_back_then_forward_restores_current() {
        let mut store = HistoryStore::new();
        store.record(scene(1), None);
        store.record(scene(2), None);
        let before = store.current().cloned();

        store.back();
        store.forward();

        assert_eq!(store.current().cloned(), before);
    }

    #[test]
    fn test_record_after_back_discards_forward() {
        let mut store = HistoryStore::new();
        store.record(scene(1), None);
        store.record(scene(2), None);
        store.record(scene(3), None);

        let back = store.back().unwrap();
        assert_eq!(back.target().id(), 2);

        store.record(scene(4), None);
        assert_eq!(ids(&store), vec![1, 2, 4]);
        assert!(!store.can_go_forward());
        assert_eq!(store.cursor(), Some(2));
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let mut store = HistoryStore::new();
        assert_eq!(store.back(), None);
        assert_eq!(store.forward(), None);

        store.record(scene(1), None);
        assert_eq!(store.back(), None);
        assert_eq!(store.forward(), None);
        assert_eq!(store.cursor(), Some(0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_resets_state() {
        let mut store = HistoryStore::new();
        store.record(scene(1), None);
        store.record(scene(2), None);
        store.back();

        store.clear();

        assert!(!store.can_go_back());
        assert!(!store.can_go_forward());
        assert!(store.current().is_none());
        assert_eq!(store.cursor(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_keep_increasing_after_clear() {
        let mut store = HistoryStore::new();
        let first = store.record(scene(1), None);
        store.clear();
        let second = store.record(scene(1), None);
        assert!(second.id() > first.id());
    }

    #[test]
    fn test_timestamps_never_decrease() {
        let now = Rc::new(Cell::new(5_000));
        let mut store = HistoryStore::with_clock(ManualClock(now.clone()));

        let a = store.record(scene(1), None);
        now.set(1_000);
        let b = store.record(scene(2), None);
        now.set(9_000);
        let c = store.record(scene(3), None);

        assert_eq!(a.timestamp(), 5_000);
        assert_eq!(b.timestamp(), 5_000);
        assert_eq!(c.timestamp(), 9_000);
    }

    #[test]
    fn test_listeners_notified_after_commit() {
        let mut store = HistoryStore::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let id = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        store.record(scene(1), None);
        store.record(scene(2), None);
        store.back();
        store.back(); // boundary, no event
        store.forward();
        store.clear();

        let kinds: Vec<&str> = events
            .borrow()
            .iter()
            .map(|e| match e {
                HistoryEvent::Recorded(_) => "recorded",
                HistoryEvent::Back(_) => "back",
                HistoryEvent::Forward(_) => "forward",
                HistoryEvent::Cleared => "cleared",
            })
            .collect();
        assert_eq!(kinds, vec!["recorded", "recorded", "back", "forward", "cleared"]);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.record(scene(3), None);
        assert_eq!(events.borrow().len(), 5);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Record(i64),
        Back,
        Forward,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0i64..100).prop_map(Op::Record),
            Just(Op::Back),
            Just(Op::Forward),
        ]
    }

    proptest! {
        #[test]
        fn prop_cursor_invariants_hold(ops in prop::collection::vec(op(), 0..64)) {
            let mut store = HistoryStore::new();
            for op in ops {
                match op {
                    Op::Record(id) => {
                        store.record(scene(id), None);
                        prop_assert_eq!(store.cursor(), Some(store.len() - 1));
                        prop_assert!(!store.can_go_forward());
                    }
                    Op::Back => {
                        let before = store.cursor();
                        let moved = store.back();
                        if moved.is_none() {
                            prop_assert_eq!(store.cursor(), before);
                        }
                    }
                    Op::Forward => {
                        let before = store.cursor();
                        let moved = store.forward();
                        if moved.is_none() {
                            prop_assert_eq!(store.cursor(), before);
                        }
                    }
                }
                match store.cursor() {
                    Some(cursor) => {
                        prop_assert!(cursor < store.len());
                        prop_assert_eq!(store.can_go_back(), cursor > 0);
                        prop_assert_eq!(store.can_go_forward(), cursor < store.len() - 1);
                    }
                    None => prop_assert!(store.is_empty()),
                }
            }
        }

        #[test]
        fn prop_back_forward_round_trip(n in 2usize..16, steps in 1usize..16) {
            let mut store = HistoryStore::new();
            for id in 0..n {
                store.record(scene(id as i64), None);
            }
            let steps = steps.min(n - 1);
            for _ in 0..steps {
                let before = store.current().cloned();
                store.back();
                store.forward();
                prop_assert_eq!(store.current().cloned(), before);
                store.back();
            }
        }
    }
}
