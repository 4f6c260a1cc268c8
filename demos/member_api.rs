//! Member search API over an in-memory SQLite database.
//!
//! ```bash
//! cargo run --example member_api
//! RUST_LOG=rostercrate=debug cargo run --example member_api
//! ```
//!
//! Then visit:
//! - **Unpaged**: <http://localhost:3000/v1/members?teamName=teamB&ageGoe=35&ageLoe=40>
//! - **Counted**: <http://localhost:3000/v2/members?teamName=teamA&page=1&size=10>
//! - **Count elided**: <http://localhost:3000/v3/members?teamName=teamB&ageGoe=90&size=20>
//! - **OpenAPI**: <http://localhost:3000/openapi.json>

use axum::{Json, Router, routing::get};
use rostercrate::entities::{member, team};
use rostercrate::{MemberApiDoc, MemberApiState, member_router};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectionTrait, Database, DatabaseConnection, DbErr};
use std::env;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(
        r"CREATE TABLE IF NOT EXISTS team (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );",
    )
    .await?;
    db.execute_unprepared(
        r"CREATE TABLE IF NOT EXISTS member (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            age INTEGER NOT NULL,
            team_id INTEGER NULL REFERENCES team (id)
        );",
    )
    .await?;
    Ok(())
}

/// teamA and teamB, then `member0..member99` aged `i`, even ones in teamA.
async fn seed(db: &DatabaseConnection) -> Result<(), DbErr> {
    let team_a = team::ActiveModel {
        name: Set("teamA".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    let team_b = team::ActiveModel {
        name: Set("teamB".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    for i in 0..100 {
        let team_id = if i % 2 == 0 { team_a.id } else { team_b.id };
        member::ActiveModel {
            username: Set(format!("member{i}")),
            age: Set(i),
            team_id: Set(Some(team_id)),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,rostercrate=debug")),
        )
        .init();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let db = Database::connect(&database_url).await?;
    create_schema(&db).await?;
    seed(&db).await?;
    tracing::info!("Seeded 2 teams and 100 members");

    let app = Router::new()
        .merge(member_router(MemberApiState::new(db)))
        .route("/openapi.json", get(|| async { Json(MemberApiDoc::openapi()) }));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("Member API listening on http://0.0.0.0:3000");
    axum::serve(listener, app).await?;

    Ok(())
}
