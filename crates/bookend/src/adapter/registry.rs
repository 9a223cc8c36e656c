//! Ordered storage for header and footer views.

use std::fmt;
use std::sync::Arc;

use super::error::{AdapterError, AdapterResult};
use super::mapping::{FixedKind, ViewTypeBands};
use super::traits::ViewType;

/// One header or footer: a view handle and the view type it is shown with.
pub struct FixedItem<V: ?Sized> {
    view_type: ViewType,
    view: Arc<V>,
}

impl<V: ?Sized> FixedItem<V> {
    /// The view type the host dispatches on.
    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    /// The view handle supplied by the caller.
    pub fn view(&self) -> &Arc<V> {
        &self.view
    }
}

impl<V: ?Sized> Clone for FixedItem<V> {
    fn clone(&self) -> Self {
        Self {
            view_type: self.view_type,
            view: Arc::clone(&self.view),
        }
    }
}

impl<V: ?Sized> fmt::Debug for FixedItem<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedItem")
            .field("view_type", &self.view_type)
            .field("view", &Arc::as_ptr(&self.view).cast::<()>())
            .finish()
    }
}

/// Ordered header or footer views, in display order.
///
/// Item `i` always carries `band base + i`: when an item is removed, every
/// item after it is re-tagged with its new index. A view type therefore
/// always decodes to the view currently displayed at that index.
///
/// Views are compared by `Arc` identity. The same view may be added more than
/// once; removal takes the first occurrence.
pub struct FixedItemRegistry<V: ?Sized> {
    kind: FixedKind,
    bands: ViewTypeBands,
    items: Vec<FixedItem<V>>,
}

impl<V: ?Sized> fmt::Debug for FixedItemRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedItemRegistry")
            .field("kind", &self.kind)
            .field("items", &self.items)
            .finish()
    }
}

impl<V: ?Sized> FixedItemRegistry<V> {
    /// Creates an empty registry tagging from the `kind` band of `bands`.
    pub fn new(kind: FixedKind, bands: ViewTypeBands) -> Self {
        Self {
            kind,
            bands,
            items: Vec::new(),
        }
    }

    /// Which kind of fixed item this registry holds.
    pub fn kind(&self) -> FixedKind {
        self.kind
    }

    /// Number of registered views.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no views are registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of views this registry can tag.
    pub fn capacity(&self) -> usize {
        self.bands.capacity()
    }

    /// Appends a view and returns the view type assigned to it.
    pub fn push(&mut self, view: Arc<V>) -> AdapterResult<ViewType> {
        let view_type = self
            .bands
            .tag(self.kind, self.items.len())
            .ok_or(AdapterError::BandExhausted {
                kind: self.kind,
                capacity: self.capacity(),
            })?;
        self.items.push(FixedItem { view_type, view });
        Ok(view_type)
    }

    /// Removes the first occurrence of `view`.
    ///
    /// Returns `true` if a view was removed.
    pub fn remove(&mut self, view: &Arc<V>) -> bool {
        let Some(index) = self.index_of(view) else {
            return false;
        };
        self.items.remove(index);
        self.renumber_from(index);
        true
    }

    /// Removes every view.
    ///
    /// Returns `true` if the registry was non-empty.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Returns `true` if `view` is registered.
    pub fn contains(&self, view: &Arc<V>) -> bool {
        self.index_of(view).is_some()
    }

    /// Returns the display index of the first occurrence of `view`.
    pub fn index_of(&self, view: &Arc<V>) -> Option<usize> {
        self.items
            .iter()
            .position(|item| Arc::ptr_eq(&item.view, view))
    }

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> Option<&FixedItem<V>> {
        self.items.get(index)
    }

    /// Returns the view type of the item at `index`.
    pub fn view_type_at(&self, index: usize) -> Option<ViewType> {
        self.items.get(index).map(FixedItem::view_type)
    }

    /// Returns the view at `index`.
    pub fn view_at(&self, index: usize) -> Option<&Arc<V>> {
        self.items.get(index).map(FixedItem::view)
    }

    /// Returns the index of the item carrying `view_type`.
    pub fn index_of_type(&self, view_type: ViewType) -> Option<usize> {
        self.bands
            .index_in_band(self.kind, view_type)
            .filter(|&index| index < self.items.len())
    }

    /// Iterates over the items in display order.
    pub fn iter(&self) -> impl Iterator<Item = &FixedItem<V>> {
        self.items.iter()
    }

    /// Returns the views in display order.
    pub fn views(&self) -> Vec<Arc<V>> {
        self.items.iter().map(|item| Arc::clone(&item.view)).collect()
    }

    fn renumber_from(&mut self, start: usize) {
        for (index, item) in self.items.iter_mut().enumerate().skip(start) {
            // Indices below the current length were taggable when pushed.
            if let Some(view_type) = self.bands.tag(self.kind, index) {
                item.view_type = view_type;
            }
        }
    }
}
