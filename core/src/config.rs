//! Tunables shared by the library and the binaries.

use serde::{Deserialize, Serialize};

/// Upper bound on the number of hits returned by a single search.
pub const DEFAULT_MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Number of logical time units a request stays in the history (one day of
/// requests at one request per minute).
pub const DEFAULT_REQUEST_WINDOW: u64 = 1440;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_result_document_count: usize,
    pub request_window: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_result_document_count: DEFAULT_MAX_RESULT_DOCUMENT_COUNT,
            request_window: DEFAULT_REQUEST_WINDOW,
        }
    }
}
