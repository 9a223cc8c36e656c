//! Adapter architecture for Bookend.
//!
//! A rendering host displays a list by pulling from a [`ListAdapter`]: it asks
//! for the item count, the view type at each position, creates a view holder
//! per view type and binds holders to positions. Adapters push change
//! notifications to registered observers, which hosts use to re-query.
//!
//! # Core Types
//!
//! - `ListAdapter`: The trait adapters implement
//! - `FixedView`: A pre-built view shown as a header or footer
//! - `ListHost`: The rendering host, as seen by layout adaptation
//! - `ViewType`: Integer tag used by hosts to dispatch view creation
//!
//! # Adapter Implementations
//!
//! - `VecAdapter`: A list of items with closure-based view creation and binding
//! - `HeaderFooterAdapter`: Wraps another adapter and adds fixed header and
//!   footer views around its items
//!
//! # Position Spaces
//!
//! ```text
//!  public position      0    1    2    3    4    5
//!                     ┌────┬────┬────┬────┬────┬────┐
//!  HeaderFooterAdapter│ h0 │ h1 │ i0 │ i1 │ i2 │ f0 │
//!                     └────┴────┼────┼────┼────┼────┘
//!  wrapped adapter              │ 0  │ 1  │ 2  │  private position
//!                               └────┴────┴────┘
//! ```
//!
//! Headers and footers carry view types from reserved bands
//! ([`ViewTypeBands`]) so they never collide with the wrapped adapter's own
//! view types.

mod error;
mod header_footer;
mod mapping;
mod registry;
mod traits;
mod vec_adapter;

pub use error::{AdapterError, AdapterResult};
pub use header_footer::{HeaderFooterAdapter, HeaderFooterAdapterBuilder, ViewHolder};
pub use mapping::{
    DEFAULT_BAND_WIDTH, DEFAULT_FOOTER_BASE, DEFAULT_HEADER_BASE, FixedKind, PositionMap, Slot,
    ViewTypeBands,
};
pub use registry::{FixedItem, FixedItemRegistry};
pub use traits::{
    DEFAULT_VIEW_TYPE, Dimension, FixedView, LayoutKind, LayoutParams, ListAdapter, ListHost,
    SpanSizeLookup, ViewType, Visibility,
};
pub use vec_adapter::{VecAdapter, ViewBinder, ViewFactory, ViewTypeExtractor};
