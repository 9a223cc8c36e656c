//! A `Vec`-backed list adapter.
//!
//! `VecAdapter<T, H>` shows a list of items using closures to create and bind
//! view holders. Every mutation notifies the adapter's observers with the
//! narrowest change that describes it.

use parking_lot::RwLock;
use std::sync::Arc;

use bookend_core::AdapterObservable;
use bookend_core::logging::targets;

use super::traits::{DEFAULT_VIEW_TYPE, ListAdapter, ViewType};

/// Type alias for a holder factory function.
pub type ViewFactory<H> = Arc<dyn Fn(ViewType) -> H + Send + Sync>;

/// Type alias for a holder binding function.
pub type ViewBinder<T, H> = Arc<dyn Fn(&T, &mut H) + Send + Sync>;

/// Type alias for a view-type extractor function.
pub type ViewTypeExtractor<T> = Arc<dyn Fn(&T) -> ViewType + Send + Sync>;

/// A list adapter over a `Vec` of items.
///
/// # Example
///
/// ```ignore
/// use bookend::adapter::{ListAdapter, VecAdapter};
///
/// struct Message {
///     from: String,
///     outgoing: bool,
/// }
///
/// let adapter = VecAdapter::new(
///     messages,
///     |view_type| Bubble::new(view_type == 1),
///     |message: &Message, bubble: &mut Bubble| bubble.set_text(&message.from),
/// )
/// .with_view_types(|message| if message.outgoing { 1 } else { 0 });
///
/// adapter.push(Message { from: "Alice".into(), outgoing: false });
/// ```
pub struct VecAdapter<T, H> {
    items: RwLock<Vec<T>>,
    factory: ViewFactory<H>,
    binder: ViewBinder<T, H>,
    view_type: Option<ViewTypeExtractor<T>>,
    observable: AdapterObservable,
}

impl<T: Send + Sync + 'static, H: 'static> VecAdapter<T, H> {
    /// Creates an adapter showing `items`.
    ///
    /// `factory` creates a holder for a view type; `binder` fills a holder
    /// with an item. Every item reports [`DEFAULT_VIEW_TYPE`] until
    /// [`with_view_types`](Self::with_view_types) is used.
    pub fn new<F, B>(items: Vec<T>, factory: F, binder: B) -> Self
    where
        F: Fn(ViewType) -> H + Send + Sync + 'static,
        B: Fn(&T, &mut H) + Send + Sync + 'static,
    {
        Self {
            items: RwLock::new(items),
            factory: Arc::new(factory),
            binder: Arc::new(binder),
            view_type: None,
            observable: AdapterObservable::new(),
        }
    }

    /// Sets the function that picks each item's view type.
    pub fn with_view_types<E>(mut self, extractor: E) -> Self
    where
        E: Fn(&T) -> ViewType + Send + Sync + 'static,
    {
        self.view_type = Some(Arc::new(extractor));
        self
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns a reference to the items (read-only access).
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.items.read()
    }

    /// Appends an item to the end of the list.
    pub fn push(&self, item: T) {
        let position = {
            let mut items = self.items.write();
            items.push(item);
            items.len() - 1
        };
        self.observable.notify_item_range_inserted(position, 1);
    }

    /// Inserts an item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&self, index: usize, item: T) {
        self.items.write().insert(index, item);
        self.observable.notify_item_range_inserted(index, 1);
    }

    /// Removes and returns the item at `index`, or `None` if out of range.
    pub fn remove(&self, index: usize) -> Option<T> {
        let removed = {
            let mut items = self.items.write();
            (index < items.len()).then(|| items.remove(index))
        };
        if removed.is_some() {
            self.observable.notify_item_range_removed(index, 1);
        }
        removed
    }

    /// Removes all items.
    pub fn clear(&self) {
        self.items.write().clear();
        tracing::trace!(target: targets::VEC_ADAPTER, "items cleared");
        self.observable.notify_changed();
    }

    /// Replaces all items.
    pub fn set_items(&self, items: Vec<T>) {
        let count = items.len();
        *self.items.write() = items;
        tracing::trace!(target: targets::VEC_ADAPTER, count, "items replaced");
        self.observable.notify_changed();
    }

    /// Provides mutable access to an item via a closure.
    ///
    /// Notifies a one-item range change after modification.
    pub fn modify<F, R>(&self, index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut items = self.items.write();
        let result = f(items.get_mut(index)?);
        drop(items);

        self.observable.notify_item_range_changed(index, 1);
        Some(result)
    }

    /// Moves the item at `from` so that it ends up at `to`.
    ///
    /// Returns `false` if either index is out of range.
    pub fn move_item(&self, from: usize, to: usize) -> bool {
        {
            let mut items = self.items.write();
            if from >= items.len() || to >= items.len() {
                return false;
            }
            let item = items.remove(from);
            items.insert(to, item);
        }
        if from != to {
            self.observable.notify_item_range_moved(from, to, 1);
        }
        true
    }
}

impl<T: Send + Sync + 'static, H: 'static> ListAdapter for VecAdapter<T, H> {
    type Holder = H;

    fn item_count(&self) -> usize {
        self.items.read().len()
    }

    fn item_view_type(&self, position: usize) -> ViewType {
        let Some(ref extractor) = self.view_type else {
            return DEFAULT_VIEW_TYPE;
        };
        self.items
            .read()
            .get(position)
            .map_or(DEFAULT_VIEW_TYPE, |item| extractor(item))
    }

    fn create_view(&self, view_type: ViewType) -> H {
        (self.factory)(view_type)
    }

    /// # Panics
    ///
    /// Panics if `position >= item_count()`.
    fn bind_view(&self, holder: &mut H, position: usize) {
        let items = self.items.read();
        (self.binder)(&items[position], holder);
    }

    fn observable(&self) -> &AdapterObservable {
        &self.observable
    }
}
