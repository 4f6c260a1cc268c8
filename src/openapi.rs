use utoipa::OpenApi;

use crate::entities::MemberTeamRow;
use crate::pagination::CountSource;

/// OpenAPI description of the member search routes.
///
/// ```rust,ignore
/// let spec = MemberApiDoc::openapi().to_pretty_json()?;
/// ```
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::search_members,
        crate::routes::search_members_page_simple,
        crate::routes::search_members_page_optimized
    ),
    components(schemas(MemberTeamRow, CountSource)),
    tags((name = "members", description = "Member search with optional team filter"))
)]
pub struct MemberApiDoc;
