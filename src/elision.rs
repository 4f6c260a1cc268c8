//! # Count Elision
//!
//! Counting a filtered, joined table can cost as much as fetching the page
//! itself. Often the page that was just fetched already tells us the total:
//!
//! | fetched vs limit         | offset | total                         |
//! |--------------------------|--------|-------------------------------|
//! | `fetched < limit`, `> 0` | any    | `offset + fetched`, no count  |
//! | `fetched == 0`           | `0`    | `0`, no count                 |
//! | `fetched == 0`           | `> 0`  | unknown, count required       |
//! | `fetched == limit`       | any    | unknown, count required       |
//! | `fetched > limit`        | any    | `InconsistentElisionState`    |
//!
//! An empty page past offset zero may mean the caller jumped beyond the end,
//! in which case the real total can be smaller than `offset`, so it is
//! always counted.

use crate::errors::SearchError;

/// Outcome of the elision decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountElision {
    /// Total derived from the fetched page; no count query needed.
    Elided(u64),
    /// The page boundary does not reveal the total; a count query must run.
    Required,
}

/// Decide whether the total can be derived from a fetched page.
///
/// Pure computation, safe to call inline.
///
/// # Errors
///
/// Returns `InconsistentElisionState` when `fetched > limit`.
pub fn elide_count(offset: u64, limit: u64, fetched: u64) -> Result<CountElision, SearchError> {
    if fetched > limit {
        return Err(SearchError::InconsistentElisionState {
            offset,
            limit,
            fetched,
        });
    }

    if fetched == 0 && offset > 0 {
        return Ok(CountElision::Required);
    }

    if fetched < limit {
        return offset
            .checked_add(fetched)
            .map(CountElision::Elided)
            .ok_or(SearchError::InconsistentElisionState {
                offset,
                limit,
                fetched,
            });
    }

    Ok(CountElision::Required)
}
