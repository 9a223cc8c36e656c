//! Observer list for adapter change notification.
//!
//! An adapter owns one [`AdapterObservable`]. Hosts (and decorating adapters)
//! register [`AdapterObserver`]s with it, and the adapter calls one of the
//! `notify_*` methods after every mutation of its data set.
//!
//! # Key Types
//!
//! - [`AdapterObserver`] - Receives change notifications
//! - [`AdapterChange`] - A single change, as delivered to observers
//! - [`AdapterObservable`] - The observer list owned by an adapter
//! - [`ObserverId`] - Identifies one registration
//!
//! # Delivery
//!
//! Notifications are delivered synchronously, on the calling thread, before
//! the `notify_*` call returns. The observer list is snapshotted before
//! delivery and no lock is held while observers run, so an observer may
//! query the adapter or unregister itself from inside a callback.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{ObserverError, ObserverResult};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for an observer registration.
    ///
    /// Returned by [`AdapterObservable::register`] and accepted by
    /// [`AdapterObservable::unregister`]. The ID stays valid until the
    /// observer is unregistered.
    pub struct ObserverId;
}

/// Receives change notifications from an adapter.
///
/// All methods default to doing nothing, so an observer only overrides the
/// notifications it cares about. Positions are in the coordinate space of the
/// adapter that emitted the change.
pub trait AdapterObserver: Send + Sync {
    /// The whole data set changed; every position and view type may be stale.
    fn on_changed(&self) {}

    /// `count` items starting at `start` changed in place.
    fn on_item_range_changed(&self, _start: usize, _count: usize) {}

    /// `count` items were inserted at `start`.
    fn on_item_range_inserted(&self, _start: usize, _count: usize) {}

    /// `count` items starting at `start` were removed.
    fn on_item_range_removed(&self, _start: usize, _count: usize) {}

    /// `count` items moved from `from` to `to`.
    fn on_item_range_moved(&self, _from: usize, _to: usize, _count: usize) {}
}

/// A single change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterChange {
    /// The whole data set changed.
    Changed,
    /// Items changed in place.
    RangeChanged { start: usize, count: usize },
    /// Items were inserted.
    RangeInserted { start: usize, count: usize },
    /// Items were removed.
    RangeRemoved { start: usize, count: usize },
    /// Items were moved.
    RangeMoved { from: usize, to: usize, count: usize },
}

impl AdapterChange {
    /// Delivers this change to `observer` through the matching callback.
    pub fn dispatch(&self, observer: &dyn AdapterObserver) {
        match *self {
            Self::Changed => observer.on_changed(),
            Self::RangeChanged { start, count } => observer.on_item_range_changed(start, count),
            Self::RangeInserted { start, count } => observer.on_item_range_inserted(start, count),
            Self::RangeRemoved { start, count } => observer.on_item_range_removed(start, count),
            Self::RangeMoved { from, to, count } => observer.on_item_range_moved(from, to, count),
        }
    }
}

/// The observer list owned by an adapter.
///
/// Observers are compared by identity (`Arc` pointer), so the same observer
/// cannot be registered twice with one observable.
pub struct AdapterObservable {
    observers: Mutex<SlotMap<ObserverId, Arc<dyn AdapterObserver>>>,
    /// Whether notification is temporarily blocked.
    blocked: AtomicBool,
}

impl Default for AdapterObservable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AdapterObservable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterObservable")
            .field("observer_count", &self.observer_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

impl AdapterObservable {
    /// Creates an observable with no observers.
    pub fn new() -> Self {
        Self {
            observers: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Registers an observer.
    ///
    /// Returns [`ObserverError::AlreadyRegistered`] if this exact observer
    /// (by `Arc` identity) is already registered.
    pub fn register(&self, observer: Arc<dyn AdapterObserver>) -> ObserverResult<ObserverId> {
        let mut observers = self.observers.lock();
        if observers
            .values()
            .any(|existing| Arc::ptr_eq(existing, &observer))
        {
            return Err(ObserverError::AlreadyRegistered);
        }
        let id = observers.insert(observer);
        tracing::trace!(
            target: targets::OBSERVABLE,
            observer_count = observers.len(),
            "observer registered"
        );
        Ok(id)
    }

    /// Unregisters an observer by its registration ID, returning it.
    pub fn unregister(&self, id: ObserverId) -> ObserverResult<Arc<dyn AdapterObserver>> {
        let mut observers = self.observers.lock();
        let observer = observers.remove(id).ok_or(ObserverError::NotRegistered)?;
        tracing::trace!(
            target: targets::OBSERVABLE,
            observer_count = observers.len(),
            "observer unregistered"
        );
        Ok(observer)
    }

    /// Returns the registration ID of `observer`, if it is registered.
    pub fn find(&self, observer: &Arc<dyn AdapterObserver>) -> Option<ObserverId> {
        self.observers
            .lock()
            .iter()
            .find(|(_, existing)| Arc::ptr_eq(existing, observer))
            .map(|(id, _)| id)
    }

    /// Returns `true` if `id` refers to a live registration.
    pub fn contains(&self, id: ObserverId) -> bool {
        self.observers.lock().contains_key(id)
    }

    /// Get the number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.lock().len()
    }

    /// Returns `true` if at least one observer is registered.
    pub fn has_observers(&self) -> bool {
        !self.observers.lock().is_empty()
    }

    /// Unregisters every observer.
    pub fn clear(&self) {
        self.observers.lock().clear();
    }

    /// Block notification temporarily.
    ///
    /// While blocked, `notify_*` calls do nothing. Useful for batch updates
    /// that end with a single [`notify_changed`](Self::notify_changed).
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if notification is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Delivers `change` to every registered observer.
    #[tracing::instrument(skip_all, target = "bookend_core::observable", level = "trace")]
    pub fn notify(&self, change: AdapterChange) {
        if self.is_blocked() {
            tracing::trace!(target: targets::OBSERVABLE, ?change, "observable blocked, skipping notify");
            return;
        }

        // Snapshot so observers can re-enter the observable.
        let observers: Vec<Arc<dyn AdapterObserver>> =
            self.observers.lock().values().cloned().collect();
        tracing::trace!(
            target: targets::OBSERVABLE,
            ?change,
            observer_count = observers.len(),
            "notifying observers"
        );

        for observer in &observers {
            change.dispatch(observer.as_ref());
        }
    }

    /// Notifies that the whole data set changed.
    pub fn notify_changed(&self) {
        self.notify(AdapterChange::Changed);
    }

    /// Notifies that `count` items starting at `start` changed in place.
    pub fn notify_item_range_changed(&self, start: usize, count: usize) {
        self.notify(AdapterChange::RangeChanged { start, count });
    }

    /// Notifies that `count` items were inserted at `start`.
    pub fn notify_item_range_inserted(&self, start: usize, count: usize) {
        self.notify(AdapterChange::RangeInserted { start, count });
    }

    /// Notifies that `count` items starting at `start` were removed.
    pub fn notify_item_range_removed(&self, start: usize, count: usize) {
        self.notify(AdapterChange::RangeRemoved { start, count });
    }

    /// Notifies that `count` items moved from `from` to `to`.
    pub fn notify_item_range_moved(&self, from: usize, to: usize, count: usize) {
        self.notify(AdapterChange::RangeMoved { from, to, count });
    }
}

static_assertions::assert_impl_all!(AdapterObservable: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every change it receives.
    #[derive(Default)]
    struct Recorder {
        changes: Mutex<Vec<AdapterChange>>,
    }

    impl AdapterObserver for Recorder {
        fn on_changed(&self) {
            self.changes.lock().push(AdapterChange::Changed);
        }

        fn on_item_range_changed(&self, start: usize, count: usize) {
            self.changes
                .lock()
                .push(AdapterChange::RangeChanged { start, count });
        }

        fn on_item_range_inserted(&self, start: usize, count: usize) {
            self.changes
                .lock()
                .push(AdapterChange::RangeInserted { start, count });
        }

        fn on_item_range_removed(&self, start: usize, count: usize) {
            self.changes
                .lock()
                .push(AdapterChange::RangeRemoved { start, count });
        }

        fn on_item_range_moved(&self, from: usize, to: usize, count: usize) {
            self.changes
                .lock()
                .push(AdapterChange::RangeMoved { from, to, count });
        }
    }

    #[test]
    fn test_register_and_notify() {
        let observable = AdapterObservable::new();
        let recorder = Arc::new(Recorder::default());

        observable.register(recorder.clone()).unwrap();
        observable.notify_changed();
        observable.notify_item_range_inserted(2, 3);
        observable.notify_item_range_moved(0, 4, 1);

        assert_eq!(
            *recorder.changes.lock(),
            vec![
                AdapterChange::Changed,
                AdapterChange::RangeInserted { start: 2, count: 3 },
                AdapterChange::RangeMoved {
                    from: 0,
                    to: 4,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_unregister_stops_delivery() {
        let observable = AdapterObservable::new();
        let recorder = Arc::new(Recorder::default());

        let id = observable.register(recorder.clone()).unwrap();
        observable.notify_item_range_removed(0, 1);
        assert!(observable.unregister(id).is_ok());
        observable.notify_item_range_removed(0, 1);

        assert_eq!(recorder.changes.lock().len(), 1);
        assert_eq!(observable.observer_count(), 0);
    }

    #[test]
    fn test_double_registration_rejected() {
        let observable = AdapterObservable::new();
        let recorder: Arc<dyn AdapterObserver> = Arc::new(Recorder::default());

        let id = observable.register(recorder.clone()).unwrap();
        assert_eq!(
            observable.register(recorder.clone()).unwrap_err(),
            ObserverError::AlreadyRegistered
        );
        assert_eq!(observable.find(&recorder), Some(id));
        assert_eq!(observable.observer_count(), 1);
    }

    #[test]
    fn test_unregister_unknown_id() {
        let observable = AdapterObservable::new();
        let recorder = Arc::new(Recorder::default());

        let id = observable.register(recorder).unwrap();
        observable.unregister(id).unwrap();
        assert!(matches!(
            observable.unregister(id),
            Err(ObserverError::NotRegistered)
        ));
    }

    #[test]
    fn test_blocked() {
        let observable = AdapterObservable::new();
        let recorder = Arc::new(Recorder::default());
        observable.register(recorder.clone()).unwrap();

        observable.notify_item_range_changed(0, 1);
        observable.set_blocked(true);
        observable.notify_changed(); // Should be ignored
        observable.set_blocked(false);
        observable.notify_item_range_changed(1, 1);

        assert_eq!(
            *recorder.changes.lock(),
            vec![
                AdapterChange::RangeChanged { start: 0, count: 1 },
                AdapterChange::RangeChanged { start: 1, count: 1 },
            ]
        );
    }

    #[test]
    fn test_observer_can_unregister_itself() {
        struct OneShot {
            observable: Arc<AdapterObservable>,
            id: Mutex<Option<ObserverId>>,
            calls: Mutex<usize>,
        }

        impl AdapterObserver for OneShot {
            fn on_changed(&self) {
                *self.calls.lock() += 1;
                if let Some(id) = self.id.lock().take() {
                    self.observable.unregister(id).unwrap();
                }
            }
        }

        let observable = Arc::new(AdapterObservable::new());
        let one_shot = Arc::new(OneShot {
            observable: observable.clone(),
            id: Mutex::new(None),
            calls: Mutex::new(0),
        });

        let id = observable.register(one_shot.clone()).unwrap();
        *one_shot.id.lock() = Some(id);

        observable.notify_changed();
        observable.notify_changed();

        assert_eq!(*one_shot.calls.lock(), 1);
        assert!(!observable.has_observers());
    }
}
