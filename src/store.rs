//! # Storage Collaborator
//!
//! [`MemberStore`] is the narrow interface the search engine needs from
//! persistence: run the content query and run the count query. Everything
//! else (connections, transactions, entity mapping) stays with the caller.
//!
//! [`SeaOrmStore`] implements it over any Sea-ORM connection. It borrows the
//! connection for one logical request, so passing a `DatabaseTransaction`
//! makes both queries of a paged search run in that transaction:
//!
//! ```rust,ignore
//! let txn = db.begin().await?;
//! let repository = MemberSearchRepository::new(SeaOrmStore::new(&txn));
//! let page = repository.search_page_optimized(&condition, &page).await?;
//! txn.commit().await?;
//! ```

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, JoinType, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};

use crate::entities::{MemberTeamRow, member, team};
use crate::page::{SortField, SortOrder};
use crate::predicate::{Predicate, conjunction};

/// Joins a search can be run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinSpec {
    /// `member LEFT JOIN team ON member.team_id = team.id`
    #[default]
    MemberLeftJoinTeam,
}

#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Fetch rows matching all `predicates`, ordered by `sort`, then sliced by
    /// `offset` and `limit` (`None` = unbounded).
    async fn query(
        &self,
        predicates: &[Predicate],
        join: JoinSpec,
        sort: &[SortOrder],
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<MemberTeamRow>, DbErr>;

    /// Count every row matching all `predicates`, ignoring paging.
    async fn count(&self, predicates: &[Predicate], join: JoinSpec) -> Result<u64, DbErr>;
}

/// Sea-ORM backed store borrowing a connection or transaction.
pub struct SeaOrmStore<'c, C> {
    conn: &'c C,
}

impl<'c, C> SeaOrmStore<'c, C>
where
    C: ConnectionTrait,
{
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

fn joined_select(predicates: &[Predicate], join: JoinSpec) -> Select<member::Entity> {
    let select = match join {
        JoinSpec::MemberLeftJoinTeam => {
            member::Entity::find().join(JoinType::LeftJoin, member::Relation::Team.def())
        }
    };
    select.filter(conjunction(predicates))
}

/// Caller orders first, then `member.id ASC` unless the caller already
/// ordered by id, so ties never make paging nondeterministic.
fn apply_sort(select: Select<member::Entity>, sort: &[SortOrder]) -> Select<member::Entity> {
    let has_id = sort.iter().any(|order| order.field == SortField::MemberId);
    let select = sort.iter().fold(select, |select, order| {
        let direction = order.direction.clone();
        match order.field {
            SortField::MemberId => select.order_by(member::Column::Id, direction),
            SortField::Username => select.order_by(member::Column::Username, direction),
            SortField::Age => select.order_by(member::Column::Age, direction),
            SortField::TeamName => select.order_by(team::Column::Name, direction),
        }
    });

    if has_id {
        select
    } else {
        select.order_by(member::Column::Id, Order::Asc)
    }
}

/// Content select for the member/team projection, before execution.
#[must_use]
pub fn content_select(
    predicates: &[Predicate],
    join: JoinSpec,
    sort: &[SortOrder],
    offset: u64,
    limit: Option<u64>,
) -> Select<member::Entity> {
    let select = joined_select(predicates, join)
        .select_only()
        .column_as(member::Column::Id, "member_id")
        .column(member::Column::Username)
        .column(member::Column::Age)
        .column_as(team::Column::Id, "team_id")
        .column_as(team::Column::Name, "team_name");

    let select = apply_sort(select, sort);
    let select = if offset > 0 { select.offset(offset) } else { select };
    select.limit(limit)
}

#[async_trait]
impl<C> MemberStore for SeaOrmStore<'_, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn query(
        &self,
        predicates: &[Predicate],
        join: JoinSpec,
        sort: &[SortOrder],
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<MemberTeamRow>, DbErr> {
        content_select(predicates, join, sort, offset, limit)
            .into_model::<MemberTeamRow>()
            .all(self.conn)
            .await
    }

    async fn count(&self, predicates: &[Predicate], join: JoinSpec) -> Result<u64, DbErr> {
        joined_select(predicates, join).count(self.conn).await
    }
}
