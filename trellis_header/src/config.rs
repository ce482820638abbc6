// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Header configuration and navigation path resolution.

use serde::{Deserialize, Serialize};
use tracing::warn;
use trellis_disclosure::ToggleLabel;
use trellis_menu::{ACCENT_ATTRIBUTE, AccentFallback, AssemblyOptions};
use trellis_viewport::{Breakpoint, DESKTOP_MIN_WIDTH};
use url::Url;

/// Path loaded when the page has no usable `nav` metadata.
pub const DEFAULT_NAV_PATH: &str = "/nav";

/// Errors produced while loading a [`HeaderConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid TOML or does not match the schema.
    #[error("invalid header configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The breakpoint is not a positive, finite width.
    #[error("desktop_min_width must be a positive, finite width, got {0}")]
    InvalidBreakpoint(f64),
    /// `base_url` is not an absolute URL.
    #[error("base_url {url:?} is not an absolute URL")]
    InvalidBaseUrl {
        /// The configured value.
        url: String,
        /// Why it failed to parse.
        #[source]
        source: url::ParseError,
    },
}

/// Accessible label text of the hamburger control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Labels {
    /// Label while the panel is closed.
    pub open: String,
    /// Label while the panel is open.
    pub close: String,
}

impl Labels {
    /// Text for a label state.
    pub fn text(&self, label: ToggleLabel) -> &str {
        match label {
            ToggleLabel::Open => &self.open,
            ToggleLabel::Close => &self.close,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            open: ToggleLabel::Open.as_str().to_owned(),
            close: ToggleLabel::Close.as_str().to_owned(),
        }
    }
}

/// Header decoration settings.
///
/// Every field has a default, so an empty document is a valid configuration.
///
/// ```rust
/// use trellis_header::HeaderConfig;
/// use trellis_menu::AccentFallback;
///
/// let config = HeaderConfig::from_toml_str(
///     r#"
///     desktop_min_width = 1024.0
///     base_url = "https://example.com/"
///     accent_fallback = { default = "primary" }
///
///     [labels]
///     open = "Menü öffnen"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.breakpoint().desktop_min_width, 1024.0);
/// assert!(matches!(config.accent_fallback, AccentFallback::Default(_)));
/// assert_eq!(config.labels.close, "Close navigation");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Smallest viewport width, in logical pixels, treated as desktop.
    pub desktop_min_width: f64,
    /// Fragment path used when the page has no `nav` metadata.
    pub default_nav_path: String,
    /// Absolute URL that relative entry links resolve against.
    pub base_url: Option<String>,
    /// Dataset key of the main bar's accent list.
    pub accent_attribute: String,
    /// Accent policy past the end of the configured list.
    pub accent_fallback: AccentFallback,
    /// Hamburger label text.
    pub labels: Labels,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            desktop_min_width: DESKTOP_MIN_WIDTH,
            default_nav_path: DEFAULT_NAV_PATH.to_owned(),
            base_url: None,
            accent_attribute: ACCENT_ATTRIBUTE.to_owned(),
            accent_fallback: AccentFallback::default(),
            labels: Labels::default(),
        }
    }
}

impl HeaderConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.desktop_min_width.is_finite() || self.desktop_min_width <= 0.0 {
            return Err(ConfigError::InvalidBreakpoint(self.desktop_min_width));
        }
        self.base()?;
        Ok(())
    }

    /// The parsed `base_url`.
    pub fn base(&self) -> Result<Option<Url>, ConfigError> {
        self.base_url
            .as_deref()
            .map(|url| {
                Url::parse(url).map_err(|source| ConfigError::InvalidBaseUrl {
                    url: url.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    /// The viewport breakpoint.
    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::new(self.desktop_min_width)
    }

    /// Options for [`trellis_menu::assemble`].
    ///
    /// An invalid `base_url` is logged and ignored; call
    /// [`HeaderConfig::validate`] to reject it up front.
    pub fn assembly_options(&self) -> AssemblyOptions {
        let base = self.base().unwrap_or_else(|err| {
            warn!(%err, "ignoring base_url");
            None
        });
        AssemblyOptions {
            base,
            accent_attribute: self.accent_attribute.clone(),
            accent_fallback: self.accent_fallback.clone(),
        }
    }
}

/// The fragment path for a page's `nav` metadata value.
///
/// The metadata may be an absolute URL or a root-relative path; only its path
/// is used. Without metadata, `default` is used.
///
/// ```rust
/// use trellis_header::nav_path;
///
/// assert_eq!(nav_path(Some("https://example.com/en/nav?x=1"), "/nav"), "/en/nav");
/// assert_eq!(nav_path(Some("/fr/nav"), "/nav"), "/fr/nav");
/// assert_eq!(nav_path(None, "/nav"), "/nav");
/// ```
pub fn nav_path(meta: Option<&str>, default: &str) -> String {
    let Some(meta) = meta.map(str::trim).filter(|meta| !meta.is_empty()) else {
        return default.to_owned();
    };
    // Root-relative values are resolved against a placeholder origin; only
    // the path survives.
    let resolved = Url::parse("https://nav.invalid/").and_then(|origin| origin.join(meta));
    match resolved {
        Ok(url) => url.path().to_owned(),
        Err(err) => {
            warn!(meta, %err, "unusable nav metadata, using the default path");
            default.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_default() {
        assert_eq!(HeaderConfig::from_toml_str("").unwrap(), HeaderConfig::default());
    }

    #[test]
    fn invalid_breakpoints_are_rejected() {
        for width in ["0.0", "-5.0", "nan", "inf"] {
            let err = HeaderConfig::from_toml_str(&format!("desktop_min_width = {width}"));
            assert!(
                matches!(err, Err(ConfigError::InvalidBreakpoint(_))),
                "{width} should be rejected"
            );
        }
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let err = HeaderConfig::from_toml_str(r#"base_url = "/relative""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
        assert!(err.to_string().contains("/relative"));
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let err = HeaderConfig::from_toml_str("breakpoint = 900").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn accent_fallback_spellings() {
        let none = HeaderConfig::from_toml_str(r#"accent_fallback = "none""#).unwrap();
        assert_eq!(none.accent_fallback, AccentFallback::None);
        let cycle = HeaderConfig::from_toml_str(r#"accent_fallback = "cycle""#).unwrap();
        assert_eq!(cycle.accent_fallback, AccentFallback::Cycle);
    }

    #[test]
    fn labels_map_toggle_states() {
        let labels = Labels::default();
        assert_eq!(labels.text(ToggleLabel::Open), "Open navigation");
        assert_eq!(labels.text(ToggleLabel::Close), "Close navigation");
    }

    #[test]
    fn nav_path_falls_back_on_blank_metadata() {
        assert_eq!(nav_path(Some("   "), "/nav"), "/nav");
        assert_eq!(nav_path(Some("nav"), "/nav"), "/nav");
        assert_eq!(nav_path(Some("http://[::1"), "/nav"), "/nav");
    }
}
