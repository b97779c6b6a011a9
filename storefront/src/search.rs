//! Search planning and result-set sizing.
//!
//! Search is an exact match on the hotel's normalized location key; there
//! is no fuzzy, prefix, or multi-field matching. The special destination
//! "All" (case-insensitive) lists the catalog instead of filtering it.

use crate::types::{LocationKey, SearchCriteria};

/// Hotels shown on the first page of results
pub const FIRST_PAGE_LIMIT: usize = 3;

/// Sentinel destination that lists the catalog instead of filtering
pub const ALL_DESTINATIONS: &str = "all";

/// Cap applied when listing via the "All" sentinel
pub const ALL_DESTINATIONS_LIMIT: usize = 10;

/// What a submitted search resolves to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchScope {
    /// Exact match on a normalized location key
    Location(LocationKey),
    /// The "All" sentinel: list up to [`ALL_DESTINATIONS_LIMIT`] hotels
    All,
}

/// Resolve search criteria into a query scope
///
/// A blank destination is a validation failure; no query is issued and
/// the error string is shown inline.
pub fn plan(criteria: &SearchCriteria) -> Result<SearchScope, String> {
    let key = LocationKey::normalize(&criteria.destination);
    if key.is_empty() {
        return Err("Please enter a destination to search.".to_string());
    }
    if key.as_str() == ALL_DESTINATIONS {
        return Ok(SearchScope::All);
    }
    Ok(SearchScope::Location(key))
}

/// Whether a "show all" control should be offered for a result set
///
/// Offered exactly when the first page came back full: the limit was
/// [`FIRST_PAGE_LIMIT`] and the results filled it, so more may exist.
/// An unlimited query never offers expansion.
#[must_use]
pub fn can_show_all(limit: Option<usize>, result_count: usize) -> bool {
    limit == Some(FIRST_PAGE_LIMIT) && result_count == FIRST_PAGE_LIMIT
}
