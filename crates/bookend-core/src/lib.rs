//! Core systems for Bookend.
//!
//! This crate provides the pieces every Bookend adapter builds on:
//!
//! - **Observer contract**: [`AdapterObserver`] receives change notifications
//!   from an adapter (full data set changes and item range changes)
//! - **Observer list**: [`AdapterObservable`] owns an adapter's registered
//!   observers and fans notifications out to them synchronously
//! - **Errors**: [`ObserverError`] for observer registration misuse
//! - **Logging**: tracing target names used across the workspace
//!
//! # Observer Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use bookend_core::{AdapterObservable, AdapterObserver};
//!
//! #[derive(Default)]
//! struct CountingObserver {
//!     changes: AtomicUsize,
//! }
//!
//! impl AdapterObserver for CountingObserver {
//!     fn on_changed(&self) {
//!         self.changes.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let observable = AdapterObservable::new();
//! let observer = Arc::new(CountingObserver::default());
//!
//! let id = observable.register(observer.clone()).unwrap();
//! observable.notify_changed();
//! assert_eq!(observer.changes.load(Ordering::SeqCst), 1);
//!
//! observable.unregister(id).unwrap();
//! observable.notify_changed();
//! assert_eq!(observer.changes.load(Ordering::SeqCst), 1);
//! ```

mod error;
pub mod logging;
pub mod observable;

pub use error::{ObserverError, ObserverResult};
pub use observable::{AdapterChange, AdapterObservable, AdapterObserver, ObserverId};
