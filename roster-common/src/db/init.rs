//! Database initialization
//!
//! Opens (or creates) the roster database, creates the `groups` and
//! `persons` tables idempotently and seeds the initial groups.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Busy timeout applied to every pooled connection
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Connection options apply per connection, so every pooled connection
    // enforces the persons -> groups foreign key
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Open a private in-memory database with the roster schema
///
/// Every `:memory:` connection is its own database, so the pool is pinned to
/// a single connection that is never recycled.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all roster tables (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_groups_table(pool).await?;
    create_persons_table(pool).await?;
    Ok(())
}

/// Create the groups table
pub async fn create_groups_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS groups (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the persons table
///
/// `group_id` is required and must reference an existing group.
pub async fn create_persons_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS persons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            date_added TEXT NOT NULL,
            group_id INTEGER NOT NULL REFERENCES groups(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_persons_group_id ON persons(group_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Insert the given group names if the groups table is empty
///
/// Returns the number of groups inserted (0 when groups already exist).
pub async fn seed_groups(pool: &SqlitePool, names: &[String]) -> Result<u64> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM groups")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        debug!(existing, "Groups already present, skipping seed");
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for name in names {
        let result = sqlx::query("INSERT INTO groups (name) VALUES (?)")
            .bind(name)
            .execute(&mut *tx)
            .await?;
        inserted += result.rows_affected();
    }
    tx.commit().await?;

    info!("Seeded {} groups", inserted);
    Ok(inserted)
}
