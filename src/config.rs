//! Page request defaults for the HTTP layer.
//!
//! `PaginationConfig` is a plain typed struct: construct it in code or
//! deserialize it from whatever configuration source the host application
//! already uses.
//!
//! ```rust,ignore
//! let pagination: PaginationConfig = serde_json::from_str(r#"{"defaultPageSize": 50}"#)?;
//! let page = pagination.resolve(&params)?;
//! ```

use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::SearchError;
use crate::page::{PageRequest, SortOrder};

/// Raw paging query parameters: `?page=2&size=20&sort=age,desc;username`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number, zero-based unless `one_indexed_parameters` is set.
    #[param(example = 0)]
    pub page: Option<i64>,
    /// Page size, clamped to the configured maximum.
    #[param(example = 20)]
    pub size: Option<i64>,
    /// Sort orders separated by `;`, each `field[,asc|desc]`.
    #[param(example = "age,desc;username")]
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationConfig {
    /// Size used when the request has no `size` parameter.
    pub default_page_size: u64,
    /// Upper bound applied to requested sizes.
    pub max_page_size: u64,
    /// Treat `page=1` as the first page.
    pub one_indexed_parameters: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 2000,
            one_indexed_parameters: false,
        }
    }
}

impl PaginationConfig {
    /// Turn query parameters into a validated [`PageRequest`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidPageRequest` for a negative page, a non-positive size,
    /// a page number below one when one-indexed, or an unparseable sort.
    pub fn resolve(&self, params: &PageParams) -> Result<PageRequest, SearchError> {
        // Zero sizes in the config fall back to one.
        let max_page_size = self.max_page_size.max(1);
        let size = match params.size {
            None => self.default_page_size.clamp(1, max_page_size),
            Some(size) if size <= 0 => {
                return Err(SearchError::invalid_page_request(format!(
                    "size must be greater than zero, got {size}"
                )));
            }
            Some(size) => u64::try_from(size)
                .unwrap_or(u64::MAX)
                .min(max_page_size),
        };

        let first_page = i64::from(self.one_indexed_parameters);
        let page = params.page.unwrap_or(first_page);
        let page = page
            .checked_sub(first_page)
            .and_then(|page| u64::try_from(page).ok())
            .ok_or_else(|| {
                SearchError::invalid_page_request(format!(
                    "page must be at least {first_page}, got {page}"
                ))
            })?;

        let sort = params
            .sort
            .as_deref()
            .map(SortOrder::parse_list)
            .transpose()?
            .unwrap_or_default();

        Ok(PageRequest::of(page, size)?.with_sort(sort))
    }
}
