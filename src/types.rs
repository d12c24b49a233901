//! Shared types used across the service and store layers.

use serde::{Deserialize, Serialize};

/// Default page size applied when a filter leaves `limit` at zero.
pub const DEFAULT_LIMIT: i64 = 20;

/// Hard ceiling for the `limit` field of any list filter.
pub const MAX_LIMIT: i64 = 1000;

/// Filter envelope for all list operations.
///
/// `offset` and `limit` page through the repository result; `path_prefix` and
/// `org` narrow it. A `limit` of zero selects [`DEFAULT_LIMIT`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Filter {
    pub path_prefix: Option<String>,
    pub org: Option<String>,
    pub offset: i64,
    pub limit: i64,
}

impl Filter {
    /// The effective page size: the configured limit, or the default when unset.
    pub fn effective_limit(&self) -> i64 {
        if self.limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.limit
        }
    }
}
