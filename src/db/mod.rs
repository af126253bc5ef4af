//! Database module: models, schema and storage for credential records.
//!
//! Layout:
//! - `models.rs`: records as served over the API, plus write drafts
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: website lookups and per-resource credential storage

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{CredentialDraft, CredentialInput, CredentialRecord, Website};
pub use schema::SQLITE_INIT;
pub use sqlite::{CredentialStorage, SqlitePool, WebsiteStorage, init_schema};

use crate::error::SitekeepError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// Open a pool for `database_url`, creating the file if missing, and apply the schema.
///
/// In-memory databases live per connection, so they get a single connection
/// that is never recycled.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, SitekeepError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_opts)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(connect_opts)
            .await?
    };

    init_schema(&pool).await?;
    Ok(pool)
}
