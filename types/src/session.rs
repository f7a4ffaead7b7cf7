use serde::Deserialize;
use serde::Serialize;

/// User-selectable options for one tokenize-and-plot run
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Keep only noun/verb/adjective tokens
    pub pos_filter: bool,
    /// Deduplicate tokens preserving first-occurrence order
    pub unique_only: bool,
}

impl RunOptions {
    pub fn new(pos_filter: bool, unique_only: bool) -> Self {
        Self {
            pos_filter,
            unique_only,
        }
    }
}
