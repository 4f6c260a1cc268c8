use sea_orm::Order;
use std::str::FromStr;

use crate::errors::SearchError;

/// Columns members can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    MemberId,
    Username,
    Age,
    TeamName,
}

impl SortField {
    /// Look a field up by its external name. Both `id` and `memberId` name the member id.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" | "memberId" => Some(Self::MemberId),
            "username" => Some(Self::Username),
            "age" => Some(Self::Age),
            "teamName" => Some(Self::TeamName),
            _ => None,
        }
    }
}

/// One `(field, direction)` entry of a sort specification.
#[derive(Debug, Clone, PartialEq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: Order,
}

impl SortOrder {
    #[must_use]
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Order::Asc,
        }
    }

    #[must_use]
    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Order::Desc,
        }
    }

    /// Parse a sort specification such as `age,desc;username`.
    ///
    /// Orders are separated by `;`, each one is `field` or `field,asc|desc`
    /// (direction is case-insensitive, default ascending). Empty input gives
    /// an empty list.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPageRequest` for an unknown field or direction.
    pub fn parse_list(spec: &str) -> Result<Vec<Self>, SearchError> {
        spec.split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for SortOrder {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',').map(str::trim);
        let name = parts.next().unwrap_or_default();
        let field = SortField::from_name(name).ok_or_else(|| {
            SearchError::invalid_page_request(format!("Unknown sort field '{name}'"))
        })?;

        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("" | "asc") => Order::Asc,
            Some("desc") => Order::Desc,
            Some(other) => {
                return Err(SearchError::invalid_page_request(format!(
                    "Unknown sort direction '{other}'"
                )));
            }
        };

        Ok(Self { field, direction })
    }
}

/// Which rows of the filtered result to return, and in what order.
///
/// `offset` and `limit` are unsigned, so a negative offset cannot be
/// represented; the constructors additionally reject a zero limit and any
/// value that does not fit the `BIGINT` bound by the storage layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    offset: u64,
    limit: u64,
    sort: Vec<SortOrder>,
}

impl PageRequest {
    /// # Errors
    ///
    /// Returns `InvalidPageRequest` when `limit` is zero, or when `offset`
    /// or `limit` exceeds `i64::MAX`.
    pub fn new(offset: u64, limit: u64) -> Result<Self, SearchError> {
        if limit == 0 {
            return Err(SearchError::invalid_page_request(
                "limit must be greater than zero",
            ));
        }
        if i64::try_from(offset).is_err() {
            return Err(SearchError::invalid_page_request(format!(
                "offset {offset} is out of range"
            )));
        }
        if i64::try_from(limit).is_err() {
            return Err(SearchError::invalid_page_request(format!(
                "limit {limit} is out of range"
            )));
        }
        Ok(Self {
            offset,
            limit,
            sort: Vec::new(),
        })
    }

    /// Validate signed caller input.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPageRequest` for `offset < 0` or `limit <= 0`.
    pub fn from_signed(offset: i64, limit: i64) -> Result<Self, SearchError> {
        let offset = u64::try_from(offset).map_err(|_| {
            SearchError::invalid_page_request(format!("offset must not be negative, got {offset}"))
        })?;
        let limit = u64::try_from(limit).map_err(|_| {
            SearchError::invalid_page_request(format!("limit must be greater than zero, got {limit}"))
        })?;
        Self::new(offset, limit)
    }

    /// Zero-based page number and page size; `offset = page * size`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPageRequest` when `size` is zero or the offset falls
    /// outside the `i64` range.
    pub fn of(page: u64, size: u64) -> Result<Self, SearchError> {
        let offset = page.checked_mul(size).ok_or_else(|| {
            SearchError::invalid_page_request(format!("page {page} of size {size} is out of range"))
        })?;
        Self::new(offset, size)
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Vec<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    #[must_use]
    pub fn sort(&self) -> &[SortOrder] {
        &self.sort
    }

    /// Zero-based page number this request falls on.
    #[must_use]
    pub fn page_number(&self) -> u64 {
        self.offset / self.limit
    }
}
