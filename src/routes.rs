use axum::{
    Json, Router,
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
};
use sea_orm::DatabaseConnection;

use crate::condition::MemberSearchCondition;
use crate::config::{PageParams, PaginationConfig};
use crate::entities::MemberTeamRow;
use crate::errors::SearchError;
use crate::pagination::{PageResult, calculate_content_range};
use crate::repository::{MemberSearchRepository, SearchMode};
use crate::store::SeaOrmStore;

/// Resource name used in the `Content-Range` header.
pub const RESOURCE_NAME: &str = "members";

/// Shared state for the member search routes.
#[derive(Clone)]
pub struct MemberApiState {
    pub db: DatabaseConnection,
    pub pagination: PaginationConfig,
}

impl MemberApiState {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            pagination: PaginationConfig::default(),
        }
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }
}

/// Router exposing `/v1/members` (unpaged), `/v2/members` (always counted)
/// and `/v3/members` (count elided when possible).
pub fn member_router(state: MemberApiState) -> Router {
    Router::new()
        .route("/v1/members", get(search_members))
        .route("/v2/members", get(search_members_page_simple))
        .route("/v3/members", get(search_members_page_optimized))
        .with_state(state)
}

#[utoipa::path(
    get,
    tag = "members",
    path = "/v1/members",
    params(MemberSearchCondition),
    responses(
        (status = 200, description = "Every member matching the condition", body = [MemberTeamRow]),
        (status = 500, description = "Internal Server Error")
    ),
    operation_id = "search_members",
    summary = "Search members",
    description = "Returns all members matching the condition, joined with their team. Not paged."
)]
pub async fn search_members(
    State(state): State<MemberApiState>,
    Query(condition): Query<MemberSearchCondition>,
) -> Result<Json<Vec<MemberTeamRow>>, SearchError> {
    let repository = MemberSearchRepository::new(SeaOrmStore::new(&state.db));
    Ok(Json(repository.search(&condition).await?))
}

#[utoipa::path(
    get,
    tag = "members",
    path = "/v2/members",
    params(MemberSearchCondition, PageParams),
    responses(
        (status = 200, description = "One page of members, total always counted", body = PageResult<MemberTeamRow>),
        (status = 400, description = "Invalid page request"),
        (status = 500, description = "Internal Server Error")
    ),
    operation_id = "search_members_page_simple",
    summary = "Search members (paged, counted)"
)]
pub async fn search_members_page_simple(
    State(state): State<MemberApiState>,
    Query(condition): Query<MemberSearchCondition>,
    Query(params): Query<PageParams>,
) -> Result<(HeaderMap, Json<PageResult<MemberTeamRow>>), SearchError> {
    search_page(&state, &condition, &params, SearchMode::Simple).await
}

#[utoipa::path(
    get,
    tag = "members",
    path = "/v3/members",
    params(MemberSearchCondition, PageParams),
    responses(
        (status = 200, description = "One page of members, count query skipped when the page reveals the total", body = PageResult<MemberTeamRow>),
        (status = 400, description = "Invalid page request"),
        (status = 500, description = "Internal Server Error")
    ),
    operation_id = "search_members_page_optimized",
    summary = "Search members (paged, count elided)"
)]
pub async fn search_members_page_optimized(
    State(state): State<MemberApiState>,
    Query(condition): Query<MemberSearchCondition>,
    Query(params): Query<PageParams>,
) -> Result<(HeaderMap, Json<PageResult<MemberTeamRow>>), SearchError> {
    search_page(&state, &condition, &params, SearchMode::Optimized).await
}

async fn search_page(
    state: &MemberApiState,
    condition: &MemberSearchCondition,
    params: &PageParams,
    mode: SearchMode,
) -> Result<(HeaderMap, Json<PageResult<MemberTeamRow>>), SearchError> {
    let page = state.pagination.resolve(params)?;
    let repository = MemberSearchRepository::new(SeaOrmStore::new(&state.db));
    let result = repository.search_page(condition, &page, mode).await?;

    let headers = calculate_content_range(&result, RESOURCE_NAME);
    Ok((headers, Json(result)))
}
