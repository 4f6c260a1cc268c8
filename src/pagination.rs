use axum::http::{HeaderMap, HeaderValue, header::CONTENT_RANGE};
use sea_orm::DbErr;
use serde::Serialize;
use std::future::Future;
use utoipa::ToSchema;

use crate::elision::{CountElision, elide_count};
use crate::errors::SearchError;
use crate::page::PageRequest;

/// How `total_elements` was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum CountSource {
    /// A count query ran.
    Counted,
    /// Derived from the fetched page without a count query.
    Elided,
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub offset: u64,
    pub limit: u64,
    pub count_source: CountSource,
}

impl<T> PageResult<T> {
    /// Assemble a page from already known parts.
    ///
    /// When the page has content but `offset + limit` overshoots the given
    /// total, the total is raised to `offset + content.len()`, so a count
    /// that went stale between the two queries never reports fewer rows
    /// than were actually returned.
    #[must_use]
    pub fn new(content: Vec<T>, page: &PageRequest, total: u64, count_source: CountSource) -> Self {
        let offset = page.offset();
        let limit = page.limit();
        let returned = offset.saturating_add(content.len() as u64);

        let total_elements = if !content.is_empty() && offset.saturating_add(limit) > total {
            if returned != total {
                tracing::debug!(total, returned, "Adjusting page total to returned rows");
            }
            returned
        } else {
            total
        };

        Self {
            content,
            total_elements,
            offset,
            limit,
            count_source,
        }
    }

    /// Zero-based page number.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.offset / self.limit
    }

    /// Requested page size (not the number of rows returned).
    #[must_use]
    pub fn size(&self) -> u64 {
        self.limit
    }

    #[must_use]
    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.limit)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.offset.saturating_add(self.limit) < self.total_elements
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        !self.has_previous()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Convert the content while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            offset: self.offset,
            limit: self.limit,
            count_source: self.count_source,
        }
    }
}

/// Build a page from fetched content, counting only when the page cannot
/// reveal the total.
///
/// `count` is consumed by value and awaited at most once, and only when
/// [`elide_count`] returns [`CountElision::Required`].
///
/// # Errors
///
/// Returns `InconsistentElisionState` when `content` is longer than the page
/// limit, or `Storage` when the count query fails.
pub async fn get_page<T, F, Fut>(
    content: Vec<T>,
    page: &PageRequest,
    count: F,
) -> Result<PageResult<T>, SearchError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<u64, DbErr>>,
{
    let fetched = content.len() as u64;
    match elide_count(page.offset(), page.limit(), fetched)? {
        CountElision::Elided(total) => Ok(PageResult::new(content, page, total, CountSource::Elided)),
        CountElision::Required => {
            let total = count().await?;
            Ok(PageResult::new(content, page, total, CountSource::Counted))
        }
    }
}

/// One page of results without a total. `has_next` is known because one
/// row past the page was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SliceResult<T> {
    pub content: Vec<T>,
    pub offset: u64,
    pub limit: u64,
    pub has_next: bool,
}

impl<T> SliceResult<T> {
    /// Build a slice from rows fetched with a limit of `page.limit() + 1`.
    /// The lookahead row, if present, is dropped.
    #[must_use]
    pub fn from_lookahead(mut content: Vec<T>, page: &PageRequest) -> Self {
        let limit = page.limit();
        let has_next = content.len() as u64 > limit;
        if has_next {
            content.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Self {
            content,
            offset: page.offset(),
            limit,
            has_next,
        }
    }

    #[must_use]
    pub fn number(&self) -> u64 {
        self.offset / self.limit
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }
}

/// Sanitize resource name by removing control characters for HTTP headers
fn sanitize_resource_name(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii() && !c.is_ascii_control()).collect()
}

/// Generate the `Content-Range` header for a page.
///
/// The value is `"<resource> <first>-<last>/<total>"`, or
/// `"<resource> */<total>"` for an empty page.
#[must_use]
pub fn calculate_content_range<T>(page: &PageResult<T>, resource_name: &str) -> HeaderMap {
    let safe_name = sanitize_resource_name(resource_name);
    let total = page.total_elements;

    let content_range = match page.content.len() as u64 {
        0 => format!("{safe_name} */{total}"),
        returned => format!(
            "{safe_name} {}-{}/{total}",
            page.offset,
            page.offset + returned - 1
        ),
    };

    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&content_range)
        .unwrap_or_else(|_| HeaderValue::from_static("items */0"));
    headers.insert(CONTENT_RANGE, value);
    headers
}
