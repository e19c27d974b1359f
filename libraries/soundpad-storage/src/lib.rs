//! Soundpad Storage
//!
//! `SQLite` persistence layer for Soundpad.
//!
//! Every record Soundpad keeps is a JSON value under a fixed logical key
//! (see [`soundpad_core::storage::keys`]). [`SqliteStore`] implements the
//! core [`DurableStore`](soundpad_core::DurableStore) trait on top of a
//! single `kv_store` table; the typed slices below work against any
//! `DurableStore`, so tests can run them over an in-memory store.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each record family owns its loading, validation
//!   and persistence logic
//! - **Fail Closed**: a corrupt record is logged and treated as absent
//! - **Last Writer Wins**: the store is process-exclusive, no optimistic
//!   concurrency
//!
//! # Example
//!
//! ```rust,no_run
//! use soundpad_storage::{playlists::PlaylistStore, SqliteStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(SqliteStore::open("soundpad.db").await?);
//! let mut playlists = PlaylistStore::load(store).await?;
//! playlists.create("Memes").await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

// Vertical slices
pub mod hotkeys;
pub mod library;
pub mod playlists;
pub mod settings;

pub use error::{Result, StorageError};
pub use store::SqliteStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Called once at startup, before the pool is handed to [`SqliteStore`].
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://soundpad.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::SqliteConnectOptions;
    use std::str::FromStr;

    tracing::debug!(url = database_url, "Creating SQLite pool");
    let options = SqliteConnectOptions::from_str(database_url)?;
    connect(options).await
}

pub(crate) async fn connect(
    options: sqlx::sqlite::SqliteConnectOptions,
) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteJournalMode, SqlitePoolOptions};

    let options = options
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("SQLite pool ready");
    Ok(pool)
}
