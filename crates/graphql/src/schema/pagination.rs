//! Page size limits applied to the `first` argument.

use crate::config::ServerConfig;

/// Bounds on requested page sizes and the recent feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Used when `first` is omitted.
    pub default_page_size: usize,
    /// Upper bound on `first`.
    pub max_page_size: usize,
    /// Entries returned by the recent feed.
    pub recent_limit: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
            recent_limit: 20,
        }
    }
}

impl PageLimits {
    /// Takes the limits from the server configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
            recent_limit: config.recent_limit,
        }
    }

    /// Resolves a requested `first` into a page size.
    ///
    /// Negative values become 0; values above the maximum are capped.
    pub fn page_size(&self, first: Option<i32>) -> usize {
        let requested = match first {
            Some(n) => usize::try_from(n).unwrap_or(0),
            None => self.default_page_size,
        };
        requested.min(self.max_page_size)
    }
}
