//! # Member Search Repository
//!
//! The query executor. Every operation builds the same predicates from the
//! condition and runs them over the same member LEFT JOIN team select; they
//! differ only in how the result is paged:
//!
//! - [`search`](MemberSearchRepository::search): everything that matches,
//!   unpaged. Only for bounded result sets.
//! - [`search_page_simple`](MemberSearchRepository::search_page_simple):
//!   content query plus an unconditional count query.
//! - [`search_page_optimized`](MemberSearchRepository::search_page_optimized):
//!   content query, then a count query only if the page cannot reveal the total.
//! - [`search_slice`](MemberSearchRepository::search_slice): content query for
//!   one extra row and no count at all.
//!
//! The repository holds nothing but its store, so it is built per request
//! around whatever connection or transaction that request uses.

use serde::Deserialize;

use crate::condition::MemberSearchCondition;
use crate::entities::MemberTeamRow;
use crate::errors::SearchError;
use crate::page::PageRequest;
use crate::pagination::{CountSource, PageResult, SliceResult, get_page};
use crate::predicate::build_predicates;
use crate::store::{JoinSpec, MemberStore};

/// Paging strategy for [`MemberSearchRepository::search_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Always run the count query.
    Simple,
    /// Skip the count query whenever the fetched page determines the total.
    #[default]
    Optimized,
}

pub struct MemberSearchRepository<S> {
    store: S,
}

impl<S> MemberSearchRepository<S>
where
    S: MemberStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Every member matching `condition`, joined with its team.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when the query fails.
    pub async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamRow>, SearchError> {
        let predicates = build_predicates(condition);
        tracing::debug!(predicates = predicates.len(), "Searching members");

        let rows = self
            .store
            .query(&predicates, JoinSpec::MemberLeftJoinTeam, &[], 0, None)
            .await?;
        Ok(rows)
    }

    /// One page of matching members with an exact, always counted total.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when either query fails.
    pub async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<PageResult<MemberTeamRow>, SearchError> {
        let predicates = build_predicates(condition);
        tracing::debug!(
            predicates = predicates.len(),
            offset = page.offset(),
            limit = page.limit(),
            "Searching member page with count"
        );

        let content = self
            .store
            .query(
                &predicates,
                JoinSpec::MemberLeftJoinTeam,
                page.sort(),
                page.offset(),
                Some(page.limit()),
            )
            .await?;
        let total = self
            .store
            .count(&predicates, JoinSpec::MemberLeftJoinTeam)
            .await?;

        Ok(PageResult::new(content, page, total, CountSource::Counted))
    }

    /// One page of matching members, counting only when the fetched page
    /// does not already determine the total.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when a query fails, or `InconsistentElisionState` if
    /// the store returns more rows than the page limit.
    pub async fn search_page_optimized(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<PageResult<MemberTeamRow>, SearchError> {
        let predicates = build_predicates(condition);

        let content = self
            .store
            .query(
                &predicates,
                JoinSpec::MemberLeftJoinTeam,
                page.sort(),
                page.offset(),
                Some(page.limit()),
            )
            .await?;

        let result = get_page(content, page, || {
            self.store
                .count(&predicates, JoinSpec::MemberLeftJoinTeam)
        })
        .await?;

        tracing::debug!(
            predicates = predicates.len(),
            offset = page.offset(),
            limit = page.limit(),
            fetched = result.content.len(),
            count_elided = result.count_source == CountSource::Elided,
            "Searched member page"
        );
        Ok(result)
    }

    /// One page of matching members without a total. Fetches a single row
    /// past the page to decide `has_next`; never counts.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when the query fails.
    pub async fn search_slice(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<SliceResult<MemberTeamRow>, SearchError> {
        let predicates = build_predicates(condition);
        let content = self
            .store
            .query(
                &predicates,
                JoinSpec::MemberLeftJoinTeam,
                page.sort(),
                page.offset(),
                Some(page.limit().saturating_add(1).min(i64::MAX.unsigned_abs())),
            )
            .await?;

        let slice = SliceResult::from_lookahead(content, page);
        tracing::debug!(
            predicates = predicates.len(),
            offset = page.offset(),
            limit = page.limit(),
            has_next = slice.has_next,
            "Searched member slice"
        );
        Ok(slice)
    }

    /// Dispatch to the simple or optimized paged search.
    ///
    /// # Errors
    ///
    /// See [`search_page_simple`](Self::search_page_simple) and
    /// [`search_page_optimized`](Self::search_page_optimized).
    pub async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
        mode: SearchMode,
    ) -> Result<PageResult<MemberTeamRow>, SearchError> {
        match mode {
            SearchMode::Simple => self.search_page_simple(condition, page).await,
            SearchMode::Optimized => self.search_page_optimized(condition, page).await,
        }
    }
}
