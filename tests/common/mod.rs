#![allow(dead_code)]

use async_trait::async_trait;
use rostercrate::entities::{member, team};
use rostercrate::{JoinSpec, MemberStore, MemberTeamRow, Predicate, SortOrder};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, DatabaseConnection, DbErr};
use sea_orm_migration::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Two teams and four members: member1/member2 (10, 20) in teamA,
/// member3/member4 (30, 40) in teamB.
pub async fn setup_scenario_db() -> Result<DatabaseConnection, DbErr> {
    let db = setup_test_db().await?;
    let team_a = insert_team(&db, "teamA").await?;
    let team_b = insert_team(&db, "teamB").await?;

    insert_member(&db, "member1", 10, Some(&team_a)).await?;
    insert_member(&db, "member2", 20, Some(&team_a)).await?;
    insert_member(&db, "member3", 30, Some(&team_b)).await?;
    insert_member(&db, "member4", 40, Some(&team_b)).await?;

    Ok(db)
}

/// `count` members named `member{i}` aged `i`; even ones in teamA, odd ones in teamB.
pub async fn setup_members_db(count: i32) -> Result<DatabaseConnection, DbErr> {
    let db = setup_test_db().await?;
    let team_a = insert_team(&db, "teamA").await?;
    let team_b = insert_team(&db, "teamB").await?;

    for i in 0..count {
        let team = if i % 2 == 0 { &team_a } else { &team_b };
        insert_member(&db, &format!("member{i}"), i, Some(team)).await?;
    }

    Ok(db)
}

pub async fn insert_team(db: &DatabaseConnection, name: &str) -> Result<team::Model, DbErr> {
    team::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_member(
    db: &DatabaseConnection,
    username: &str,
    age: i32,
    team: Option<&team::Model>,
) -> Result<member::Model, DbErr> {
    member::ActiveModel {
        username: Set(username.to_string()),
        age: Set(age),
        team_id: Set(team.map(|team| team.id)),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub fn usernames(rows: &[MemberTeamRow]) -> Vec<&str> {
    rows.iter().map(|row| row.username.as_str()).collect()
}

/// Store wrapper that records how often each collaborator call is made.
pub struct CountingStore<S> {
    inner: S,
    pub queries: Arc<AtomicUsize>,
    pub counts: Arc<AtomicUsize>,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            queries: Arc::new(AtomicUsize::new(0)),
            counts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (Arc::clone(&self.queries), Arc::clone(&self.counts))
    }
}

#[async_trait]
impl<S: MemberStore> MemberStore for CountingStore<S> {
    async fn query(
        &self,
        predicates: &[Predicate],
        join: JoinSpec,
        sort: &[SortOrder],
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<MemberTeamRow>, DbErr> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.query(predicates, join, sort, offset, limit).await
    }

    async fn count(&self, predicates: &[Predicate], join: JoinSpec) -> Result<u64, DbErr> {
        self.counts.fetch_add(1, Ordering::SeqCst);
        self.inner.count(predicates, join).await
    }
}

/// Store whose every call fails, counting the attempts.
#[derive(Default)]
pub struct FailingStore {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl MemberStore for FailingStore {
    async fn query(
        &self,
        _predicates: &[Predicate],
        _join: JoinSpec,
        _sort: &[SortOrder],
        _offset: u64,
        _limit: Option<u64>,
    ) -> Result<Vec<MemberTeamRow>, DbErr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DbErr::Conn(sea_orm::RuntimeErr::Internal(
            "connection refused".to_string(),
        )))
    }

    async fn count(&self, _predicates: &[Predicate], _join: JoinSpec) -> Result<u64, DbErr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DbErr::Conn(sea_orm::RuntimeErr::Internal(
            "connection refused".to_string(),
        )))
    }
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateTeamTable), Box::new(CreateMemberTable)]
    }
}

pub struct CreateTeamTable;

impl MigrationName for CreateTeamTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_team_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateTeamTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(TeamEntity)
            .if_not_exists()
            .col(
                ColumnDef::new(TeamColumn::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(TeamColumn::Name).string().not_null())
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamEntity).to_owned())
            .await
    }
}

pub struct CreateMemberTable;

impl MigrationName for CreateMemberTable {
    fn name(&self) -> &'static str {
        "m20240101_000002_create_member_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateMemberTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(MemberEntity)
            .if_not_exists()
            .col(
                ColumnDef::new(MemberColumn::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(MemberColumn::Username).string().not_null())
            .col(ColumnDef::new(MemberColumn::Age).integer().not_null())
            .col(ColumnDef::new(MemberColumn::TeamId).integer().null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_member_team")
                    .from(MemberEntity, MemberColumn::TeamId)
                    .to(TeamEntity, TeamColumn::Id),
            )
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MemberEntity).to_owned())
            .await
    }
}

#[derive(Debug)]
pub struct TeamEntity;

impl Iden for TeamEntity {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "team").unwrap();
    }
}

#[derive(Debug)]
pub enum TeamColumn {
    Id,
    Name,
}

impl Iden for TeamColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct MemberEntity;

impl Iden for MemberEntity {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "member").unwrap();
    }
}

#[derive(Debug)]
pub enum MemberColumn {
    Id,
    Username,
    Age,
    TeamId,
}

impl Iden for MemberColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Username => "username",
                Self::Age => "age",
                Self::TeamId => "team_id",
            }
        )
        .unwrap();
    }
}
