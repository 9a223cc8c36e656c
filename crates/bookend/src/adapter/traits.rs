//! Core traits for the adapter architecture.
//!
//! This module defines the contract between adapters, the fixed views they
//! decorate with, and the rendering host that pulls from them.

use std::sync::Arc;

use bookend_core::{AdapterObservable, AdapterObserver, ObserverId, ObserverResult};

/// Integer tag identifying a kind of view.
///
/// Hosts keep one view holder pool per view type and call
/// [`ListAdapter::create_view`] with the type when the pool is empty.
pub type ViewType = i32;

/// The view type reported by adapters that only have one kind of item.
pub const DEFAULT_VIEW_TYPE: ViewType = 0;

/// Display visibility of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// The view is shown and takes up space.
    #[default]
    Visible,
    /// The view is hidden and takes up no space.
    Gone,
}

impl Visibility {
    /// Maps a "should show" flag to a visibility.
    pub fn from_visible(visible: bool) -> Self {
        if visible { Self::Visible } else { Self::Gone }
    }

    /// Returns `true` for [`Visibility::Visible`].
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}

/// A size directive along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Fill the parent along this axis.
    MatchParent,
    /// Size to the view's own content.
    WrapContent,
}

/// Layout directive written onto a view by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutParams {
    /// Width directive.
    pub width: Dimension,
    /// Height directive.
    pub height: Dimension,
    /// Span every track of a staggered multi-track layout.
    pub full_span: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            width: Dimension::WrapContent,
            height: Dimension::WrapContent,
            full_span: false,
        }
    }
}

impl LayoutParams {
    /// Params for a header or footer: full row width, height sized to content.
    ///
    /// `full_span` is set when the host uses a staggered multi-track layout.
    pub fn fixed_item(full_span: bool) -> Self {
        Self {
            width: Dimension::MatchParent,
            height: Dimension::WrapContent,
            full_span,
        }
    }
}

/// A pre-built view shown as a header or footer.
///
/// The adapter never constructs or destroys fixed views. It only writes the
/// visibility and the layout directive. Identity is `Arc` identity.
pub trait FixedView: Send + Sync {
    /// Sets the display visibility.
    fn set_visibility(&self, visibility: Visibility);

    /// Sets the layout directive.
    fn set_layout_params(&self, params: LayoutParams);
}

/// How the host arranges items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutKind {
    /// One item per row.
    #[default]
    Linear,
    /// Items grouped into rows of `span_count` tracks.
    Grid {
        /// Number of tracks per row.
        span_count: usize,
    },
    /// Items placed into `span_count` independent tracks.
    StaggeredGrid {
        /// Number of tracks.
        span_count: usize,
    },
}

impl LayoutKind {
    /// Returns the number of tracks (1 for linear layouts).
    pub fn span_count(&self) -> usize {
        match *self {
            Self::Linear => 1,
            Self::Grid { span_count } | Self::StaggeredGrid { span_count } => span_count,
        }
    }
}

/// Maps a position to the number of tracks the item occupies.
pub type SpanSizeLookup = Arc<dyn Fn(usize) -> usize + Send + Sync>;

/// The rendering host that displays an adapter.
pub trait ListHost: Send + Sync {
    /// Returns the active layout.
    fn layout(&self) -> LayoutKind;

    /// Installs the span-size lookup used by grid layouts.
    fn set_span_size_lookup(&self, lookup: SpanSizeLookup);
}

/// The core trait for position-indexed list adapters.
///
/// A host pulls from an adapter: it asks for [`item_count`](Self::item_count),
/// then for the [`item_view_type`](Self::item_view_type) of each visible
/// position, creates holders with [`create_view`](Self::create_view) and fills
/// them with [`bind_view`](Self::bind_view). Positions passed to
/// `item_view_type` and `bind_view` are always in `0..item_count()`.
///
/// # Implementation Requirements
///
/// At minimum, you must implement:
/// - [`item_count`](Self::item_count) - Number of items
/// - [`create_view`](Self::create_view) - Create a holder for a view type
/// - [`bind_view`](Self::bind_view) - Fill a holder with the item at a position
/// - [`observable`](Self::observable) - The adapter's observer list
///
/// Adapters with more than one kind of item also implement
/// [`item_view_type`](Self::item_view_type). Adapters must emit
/// notifications through their observable after every data set mutation.
pub trait ListAdapter: Send + Sync {
    /// The view holder type this adapter creates and binds.
    type Holder;

    /// Returns the number of items.
    fn item_count(&self) -> usize;

    /// Returns the view type of the item at `position`.
    ///
    /// The default reports [`DEFAULT_VIEW_TYPE`] for every item.
    fn item_view_type(&self, _position: usize) -> ViewType {
        DEFAULT_VIEW_TYPE
    }

    /// Creates a new holder for items of `view_type`.
    fn create_view(&self, view_type: ViewType) -> Self::Holder;

    /// Fills `holder` with the item at `position`.
    fn bind_view(&self, holder: &mut Self::Holder, position: usize);

    /// Returns the observer list for this adapter.
    fn observable(&self) -> &AdapterObservable;

    // -------------------------------------------------------------------------
    // Optional methods with default implementations
    // -------------------------------------------------------------------------

    /// Registers an observer for change notifications.
    fn register_observer(&self, observer: Arc<dyn AdapterObserver>) -> ObserverResult<ObserverId> {
        self.observable().register(observer)
    }

    /// Unregisters an observer by its registration ID.
    fn unregister_observer(&self, id: ObserverId) -> ObserverResult<()> {
        self.observable().unregister(id).map(drop)
    }

    /// Called when a host starts displaying this adapter.
    fn on_attached(&self, _host: &dyn ListHost) {}

    /// Called when a host stops displaying this adapter.
    fn on_detached(&self, _host: &dyn ListHost) {}

    /// Returns `true` if the adapter has no items.
    fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_from_flag() {
        assert_eq!(Visibility::from_visible(true), Visibility::Visible);
        assert_eq!(Visibility::from_visible(false), Visibility::Gone);
        assert!(Visibility::default().is_visible());
    }

    #[test]
    fn test_fixed_item_params() {
        let params = LayoutParams::fixed_item(false);
        assert_eq!(params.width, Dimension::MatchParent);
        assert_eq!(params.height, Dimension::WrapContent);
        assert!(!params.full_span);
        assert!(LayoutParams::fixed_item(true).full_span);
    }

    #[test]
    fn test_layout_kind_span_count() {
        assert_eq!(LayoutKind::Linear.span_count(), 1);
        assert_eq!(LayoutKind::Grid { span_count: 3 }.span_count(), 3);
        assert_eq!(LayoutKind::StaggeredGrid { span_count: 2 }.span_count(), 2);
        assert_eq!(LayoutKind::default(), LayoutKind::Linear);
    }
}
