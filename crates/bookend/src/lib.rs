//! Bookend - header and footer decoration for list adapters.
//!
//! This is the main crate. It re-exports the core observer types and provides
//! the adapter layer:
//!
//! - [`adapter::ListAdapter`]: the position-indexed adapter contract a
//!   rendering host pulls from
//! - [`adapter::HeaderFooterAdapter`]: a decorator that places fixed header
//!   and footer views around any `ListAdapter`
//! - [`adapter::VecAdapter`]: a `Vec`-backed adapter for simple lists
//! - [`config::AdapterConfig`]: the reserved view-type bands, loadable from
//!   TOML
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use bookend::adapter::{
//!     FixedView, HeaderFooterAdapter, LayoutParams, ListAdapter, VecAdapter, Visibility,
//! };
//!
//! struct Banner;
//!
//! impl FixedView for Banner {
//!     fn set_visibility(&self, _visibility: Visibility) {}
//!     fn set_layout_params(&self, _params: LayoutParams) {}
//! }
//!
//! let rows = Arc::new(VecAdapter::new(
//!     vec!["Apple".to_string(), "Banana".to_string()],
//!     |_view_type| String::new(),
//!     |item: &String, holder: &mut String| holder.clone_from(item),
//! ));
//!
//! let adapter: HeaderFooterAdapter<_> = HeaderFooterAdapter::new(rows);
//! adapter.add_header(Arc::new(Banner) as Arc<dyn FixedView>).unwrap();
//!
//! assert_eq!(adapter.item_count(), 3);
//! assert!(adapter.view_type_at(0).unwrap() < 0);
//! assert_eq!(adapter.wrapped_position(1), Some(0));
//! ```

pub use bookend_core::*;

/// List adapters and the header/footer decorator.
pub mod adapter;

/// Adapter configuration.
pub mod config;
