use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{info, instrument};

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'student' CHECK (role IN ('student', 'owner', 'admin'))
)";
const CREATE_ID_INDEX: &str = "CREATE INDEX IF NOT EXISTS ix_users_id ON users (id)";
const CREATE_EMAIL_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS ix_users_email ON users (email)";

/// Opens a pool for `database_url`, creating the database file if missing.
///
/// An in-memory database lives only as long as its connection, so it gets a
/// single connection that is never recycled.
#[instrument]
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .context("Invalid database URL format")?
        .create_if_missing(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;
    info!("Database connected");
    Ok(pool)
}

/// Creates the `users` table and its indexes when absent. Existing data is
/// left untouched.
#[instrument(skip(pool))]
pub async fn init_db(pool: &SqlitePool) -> Result<()> {
    for statement in [CREATE_USERS_TABLE, CREATE_ID_INDEX, CREATE_EMAIL_INDEX] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to initialize database schema")?;
    }
    info!("Database schema ready");
    Ok(())
}
