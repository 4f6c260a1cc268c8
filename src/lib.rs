//! # rostercrate
//!
//! Filtered, paginated member search over a member/team model built on
//! Sea-ORM.
//!
//! A [`MemberSearchCondition`] holds optional search fields. The predicate
//! builder turns the populated ones into typed predicates that are ANDed
//! together, so an empty condition simply matches every member. The
//! [`MemberSearchRepository`] runs those predicates over `member LEFT JOIN
//! team` and pages the result in one of two ways:
//!
//! - **simple**: content query plus count query, always.
//! - **optimized**: content query, then a count query only when the fetched
//!   page cannot tell the total (see [`elision`]).
//!
//! A slice search ([`MemberSearchRepository::search_slice`]) skips the total
//! altogether and only reports whether another page follows.
//!
//! ```rust,ignore
//! use rostercrate::{MemberSearchCondition, MemberSearchRepository, PageRequest, SeaOrmStore};
//!
//! let repository = MemberSearchRepository::new(SeaOrmStore::new(&db));
//! let condition = MemberSearchCondition::new().with_team_name("teamB").with_age_goe(35);
//! let page = repository
//!     .search_page_optimized(&condition, &PageRequest::new(0, 3)?)
//!     .await?;
//! println!("{} of {}", page.content.len(), page.total_elements);
//! ```

pub mod condition;
pub mod config;
pub mod elision;
pub mod entities;
pub mod errors;
pub mod openapi;
pub mod page;
pub mod pagination;
pub mod predicate;
pub mod repository;
pub mod routes;
pub mod store;

pub use condition::MemberSearchCondition;
pub use config::{PageParams, PaginationConfig};
pub use elision::{CountElision, elide_count};
pub use entities::MemberTeamRow;
pub use errors::SearchError;
pub use openapi::MemberApiDoc;
pub use page::{PageRequest, SortField, SortOrder};
pub use pagination::{CountSource, PageResult, SliceResult, calculate_content_range, get_page};
pub use predicate::{FilterField, FilterOperator, Predicate, build_predicates, conjunction};
pub use repository::{MemberSearchRepository, SearchMode};
pub use routes::{MemberApiState, member_router};
pub use store::{JoinSpec, MemberStore, SeaOrmStore};
