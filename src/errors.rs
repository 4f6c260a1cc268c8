//! # Search Errors
//!
//! Every search operation returns [`SearchError`]. There are three kinds:
//!
//! - **`InvalidPageRequest`**: the caller asked for an impossible page (zero
//!   limit, negative offset, unknown sort field). Raised before any storage
//!   call is made.
//! - **`Storage`**: the underlying fetch or count failed. The `DbErr` is kept
//!   untouched so callers can inspect it; it is never retried here.
//! - **`InconsistentElisionState`**: the count elision step was handed a page
//!   with more rows than its limit. This is a programming error, not a user
//!   error.
//!
//! ## HTTP mapping
//!
//! When used from an axum handler the error converts into a response. Only
//! page request problems are reported back verbatim; storage and internal
//! details are logged with `tracing` and replaced by a generic message.
//!
//! ```rust,ignore
//! async fn handler(State(state): State<MemberApiState>) -> Result<Json<Vec<MemberTeamRow>>, SearchError> {
//!     let repository = MemberSearchRepository::new(SeaOrmStore::new(&state.db));
//!     Ok(Json(repository.search(&MemberSearchCondition::default()).await?))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum SearchError {
    /// 400 Bad Request - offset/limit/sort rejected before querying
    InvalidPageRequest {
        /// User-facing reason
        message: String,
    },

    /// 500 Internal Server Error - fetch or count failed (details logged, not exposed)
    Storage(DbErr),

    /// 500 Internal Server Error - elision invoked with a page larger than its limit
    InconsistentElisionState {
        offset: u64,
        limit: u64,
        fetched: u64,
    },
}

impl SearchError {
    /// Create an `InvalidPageRequest` error
    ///
    /// # Example
    /// ```rust,ignore
    /// return Err(SearchError::invalid_page_request("limit must be greater than zero"));
    /// ```
    pub fn invalid_page_request(message: impl Into<String>) -> Self {
        Self::InvalidPageRequest {
            message: message.into(),
        }
    }

    /// Wrap a storage failure without translating it.
    #[must_use]
    pub fn storage(err: DbErr) -> Self {
        Self::Storage(err)
    }

    /// True for errors caused by the caller's input rather than by the system.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidPageRequest { .. })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPageRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::InconsistentElisionState { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Sanitized message sent to HTTP clients
    fn user_message(&self) -> String {
        match self {
            Self::InvalidPageRequest { message } => message.clone(),
            Self::Storage(_) => "A database error occurred".to_string(),
            Self::InconsistentElisionState { .. } => "Internal Server Error".to_string(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Storage(internal) => {
                tracing::error!(error = ?internal, "Storage error during member search");
            }
            Self::InconsistentElisionState {
                offset,
                limit,
                fetched,
            } => {
                tracing::error!(
                    offset,
                    limit,
                    fetched,
                    "Count elision invoked with more rows than the page limit"
                );
            }
            Self::InvalidPageRequest { message } => {
                tracing::debug!(error = %message, "Rejected page request");
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPageRequest { message } => write!(f, "invalid page request: {message}"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
            Self::InconsistentElisionState {
                offset,
                limit,
                fetched,
            } => write!(
                f,
                "inconsistent elision state: fetched {fetched} rows for limit {limit} at offset {offset}"
            ),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbErr> for SearchError {
    fn from(err: DbErr) -> Self {
        Self::Storage(err)
    }
}
