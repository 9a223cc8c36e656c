//! Adapter configuration.
//!
//! The only tunables are the reserved view-type bands. Defaults keep both
//! bands at the far negative end of `i32`; change them if a wrapped adapter
//! already uses that range for its own view types.
//!
//! # Loading from TOML
//!
//! ```
//! use bookend::config::AdapterConfig;
//!
//! let config = AdapterConfig::from_toml_str(
//!     r#"
//!     header_base = -4096
//!     footer_base = -2048
//!     band_width = 1024
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.band_width, 1024);
//! ```
//!
//! Missing keys take their default values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapter::{
    DEFAULT_BAND_WIDTH, DEFAULT_FOOTER_BASE, DEFAULT_HEADER_BASE, FixedKind, ViewType,
    ViewTypeBands,
};
use bookend_core::logging::targets;

/// Errors produced while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be written as TOML.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The band width is zero.
    #[error("band width must be greater than zero")]
    EmptyBand,

    /// A band runs past `i32::MAX`.
    #[error("{kind} band starting at {base} with width {width} overflows the view type range")]
    BandOverflow {
        kind: FixedKind,
        base: ViewType,
        width: u32,
    },

    /// The header and footer bands share view types.
    #[error(
        "header band at {header_base} and footer band at {footer_base} overlap (width {width})"
    )]
    OverlappingBands {
        header_base: ViewType,
        footer_base: ViewType,
        width: u32,
    },
}

/// Configuration for a [`HeaderFooterAdapter`](crate::adapter::HeaderFooterAdapter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// First view type of the header band.
    pub header_base: ViewType,
    /// First view type of the footer band.
    pub footer_base: ViewType,
    /// Number of view types in each band.
    pub band_width: u32,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            header_base: DEFAULT_HEADER_BASE,
            footer_base: DEFAULT_FOOTER_BASE,
            band_width: DEFAULT_BAND_WIDTH,
        }
    }
}

impl AdapterConfig {
    /// Parses and validates a configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loading adapter configuration");
        Self::from_toml_str(&source)
    }

    /// Writes the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Checks that both bands are non-empty, fit in `i32`, and are disjoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.band_width == 0 {
            return Err(ConfigError::EmptyBand);
        }

        for kind in [FixedKind::Header, FixedKind::Footer] {
            let base = self.bands().base(kind);
            let last = i64::from(base) + i64::from(self.band_width) - 1;
            if last > i64::from(ViewType::MAX) {
                return Err(ConfigError::BandOverflow {
                    kind,
                    base,
                    width: self.band_width,
                });
            }
        }

        if self.bands().overlaps() {
            return Err(ConfigError::OverlappingBands {
                header_base: self.header_base,
                footer_base: self.footer_base,
                width: self.band_width,
            });
        }

        Ok(())
    }

    /// Returns the bands described by this configuration.
    pub fn bands(&self) -> ViewTypeBands {
        ViewTypeBands::new(self.header_base, self.footer_base, self.band_width)
    }
}

static_assertions::assert_impl_all!(AdapterConfig: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AdapterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bands(), ViewTypeBands::default());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AdapterConfig::from_toml_str("band_width = 64").unwrap();
        assert_eq!(config.band_width, 64);
        assert_eq!(config.header_base, DEFAULT_HEADER_BASE);
        assert_eq!(config.footer_base, DEFAULT_FOOTER_BASE);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AdapterConfig {
            header_base: -5000,
            footer_base: -3000,
            band_width: 100,
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(AdapterConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_overlap() {
        let err = AdapterConfig::from_toml_str(
            r#"
            header_base = -1024
            footer_base = -2048
            band_width = 2048
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::OverlappingBands { .. }));
    }

    #[test]
    fn test_rejects_empty_band() {
        let err = AdapterConfig::from_toml_str("band_width = 0").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyBand));
    }

    #[test]
    fn test_rejects_overflow() {
        let config = AdapterConfig {
            header_base: i32::MAX - 10,
            footer_base: 0,
            band_width: 100,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BandOverflow {
                kind: FixedKind::Header,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = AdapterConfig::from_toml_str("band_width = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AdapterConfig::from_toml_file("/nonexistent/bookend.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
