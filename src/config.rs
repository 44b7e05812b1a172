//! Editor configuration.
//!
//! [`EditorConfig`] gathers the few knobs a session needs: where the mesh
//! backend lives, how long to wait for it, and the initial element line width.
//!
//! ```
//! use std::time::Duration;
//! use meshcode::config::EditorConfig;
//!
//! let config = EditorConfig::default()
//!     .with_backend_url("http://localhost:8080")
//!     .with_timeout(Duration::from_secs(5));
//! assert_eq!(config.backend_url, "http://localhost:8080");
//! ```

use std::time::Duration;

use crate::error::{EditorError, Result};

/// Environment variable overriding [`EditorConfig::backend_url`].
pub const ENV_BACKEND_URL: &str = "MESHCODE_BACKEND_URL";
/// Environment variable overriding [`EditorConfig::timeout`], in seconds.
pub const ENV_TIMEOUT_SECS: &str = "MESHCODE_TIMEOUT_SECS";
/// Environment variable overriding [`EditorConfig::line_width`].
pub const ENV_LINE_WIDTH: &str = "MESHCODE_LINE_WIDTH";

/// Element edge width in plot units, as read from the line-width slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineWidth(f64);

impl LineWidth {
    /// Width used when the control holds nothing usable.
    pub const DEFAULT: LineWidth = LineWidth(0.5);

    /// Create a line width, falling back to [`LineWidth::DEFAULT`] for
    /// non-finite, zero or negative values.
    pub fn new(width: f64) -> Self {
        if width.is_finite() && width > 0.0 {
            LineWidth(width)
        } else {
            Self::DEFAULT
        }
    }

    /// Parse the raw value of the slider control.
    pub fn from_control(raw: &str) -> Self {
        raw.trim()
            .parse::<f64>()
            .map(LineWidth::new)
            .unwrap_or(Self::DEFAULT)
    }

    /// The width value.
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for LineWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for an editing session.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Base URL of the mesh backend, without trailing path.
    pub backend_url: String,

    /// Timeout applied to every backend request.
    pub timeout: Duration,

    /// Initial element line width.
    pub line_width: LineWidth,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            timeout: Duration::from_secs(30),
            line_width: LineWidth::DEFAULT,
        }
    }
}

impl EditorConfig {
    /// Set the backend base URL.
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the initial line width.
    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = LineWidth::new(width);
        self
    }

    /// Defaults overlaid with the `MESHCODE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BACKEND_URL) {
            if url.trim().is_empty() {
                return Err(EditorError::invalid_param(
                    "backend_url",
                    url,
                    "must not be empty",
                ));
            }
            config.backend_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| EditorError::invalid_param("timeout", &raw, "expected whole seconds"))?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(ENV_LINE_WIDTH) {
            let width = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| EditorError::invalid_param("line_width", &raw, "expected a number"))?;
            config.line_width = LineWidth::new(width);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_width_from_control() {
        assert_eq!(LineWidth::from_control("1.5").get(), 1.5);
        assert_eq!(LineWidth::from_control(" 2 ").get(), 2.0);
        assert_eq!(LineWidth::from_control("abc"), LineWidth::DEFAULT);
        assert_eq!(LineWidth::from_control("0"), LineWidth::DEFAULT);
        assert_eq!(LineWidth::from_control("-3"), LineWidth::DEFAULT);
        assert_eq!(LineWidth::from_control(""), LineWidth::DEFAULT);
    }

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.backend_url, "http://127.0.0.1:5000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.line_width.get(), 0.5);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = EditorConfig::from_lookup(|key| match key {
            ENV_BACKEND_URL => Some("http://mesh.local:9000".to_string()),
            ENV_TIMEOUT_SECS => Some("7".to_string()),
            ENV_LINE_WIDTH => Some("1.25".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.backend_url, "http://mesh.local:9000");
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.line_width.get(), 1.25);
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let result = EditorConfig::from_lookup(|key| {
            (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string())
        });
        assert!(matches!(
            result,
            Err(EditorError::InvalidParameter { name: "timeout", .. })
        ));
    }
}
