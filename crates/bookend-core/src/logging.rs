//! Logging facilities for Bookend.
//!
//! Bookend uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("bookend=debug,bookend_core=trace"))
//!     .init();
//! ```
//!
//! Structural changes to an adapter (headers and footers added or removed,
//! layout adaptation, host attachment) are logged at `debug`. Observer
//! fan-out is logged at `trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Observer registration and notification target.
    pub const OBSERVABLE: &str = "bookend_core::observable";
    /// Header/footer adapter target.
    pub const ADAPTER: &str = "bookend::adapter";
    /// Reference `Vec`-backed adapter target.
    pub const VEC_ADAPTER: &str = "bookend::adapter::vec";
    /// Configuration loading target.
    pub const CONFIG: &str = "bookend::config";
}
