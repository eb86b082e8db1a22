//! MySQL-backed voter store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | VoterStoreError | Scenario |
//! |------------|-----------------|----------|
//! | Database (unique violation) on insert | `Duplicate` | `voter_id` already stored, including concurrent inserts |
//! | Database (other) | `Backend` | Schema / permission / constraint problems |
//! | PoolTimedOut / PoolClosed / Io | `Backend` | Connectivity |
//! | Row with an unusable `voter_id` | `Backend` | Table written by another tool |
//!
//! ## Identity Matching
//!
//! `voter_id` uses a binary collation so lookups and uniqueness are exact,
//! as in the in-memory store. Lookups also compare the stored id, so tables
//! created with a case-insensitive collation never resolve `A1` to `a1`.
//!
//! ## Thread Safety
//!
//! `MySqlVoterStore` is `Send + Sync`; the SQLx pool handles connection
//! sharing. The pool is opened by the composition root and closed with
//! [`MySqlVoterStore::close`] at shutdown.

use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Row;
use tracing::instrument;

use ballotgate_auth::{Password, Role};
use ballotgate_core::VoterId;

use super::r#trait::{VoterRecord, VoterStore, VoterStoreError, VoterSummary};

const CREATE_VOTERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS voters (
    voter_id VARCHAR(64) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL PRIMARY KEY,
    password VARCHAR(255) NOT NULL,
    role VARCHAR(32) NOT NULL DEFAULT 'voter'
)
"#;

#[derive(Debug, Clone)]
pub struct MySqlVoterStore {
    pool: MySqlPool,
}

impl MySqlVoterStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool.
    pub async fn connect(
        options: MySqlConnectOptions,
        max_connections: u32,
    ) -> Result<Self, VoterStoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `voters` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), VoterStoreError> {
        sqlx::query(CREATE_VOTERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait::async_trait]
impl VoterStore for MySqlVoterStore {
    #[instrument(skip(self, voter_id), fields(voter_id = %voter_id), err)]
    async fn find_by_voter_id(&self, voter_id: &VoterId) -> Result<Option<VoterRecord>, VoterStoreError> {
        let row = sqlx::query("SELECT voter_id, password, role FROM voters WHERE voter_id = ?")
            .bind(voter_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_voter_id", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stored_id: String = row
            .try_get("voter_id")
            .map_err(|e| map_sqlx_error("find_by_voter_id", e))?;
        if stored_id != voter_id.as_str() {
            return Ok(None);
        }

        let password: String = row
            .try_get("password")
            .map_err(|e| map_sqlx_error("find_by_voter_id", e))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| map_sqlx_error("find_by_voter_id", e))?;

        Ok(Some(VoterRecord::new(
            voter_id.clone(),
            Password::new(password),
            Role::new(role),
        )))
    }

    /// Single `INSERT`; the primary key decides duplicates.
    ///
    /// A concurrent insert of the same id waits on the first writer's row
    /// lock and then fails with a unique violation.
    #[instrument(skip(self, record), fields(voter_id = %record.voter_id), err)]
    async fn insert(&self, record: VoterRecord) -> Result<(), VoterStoreError> {
        sqlx::query("INSERT INTO voters (voter_id, password, role) VALUES (?, ?, ?)")
            .bind(record.voter_id.as_str())
            .bind(record.password.expose())
            .bind(record.role.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    VoterStoreError::Duplicate(record.voter_id.clone())
                } else {
                    map_sqlx_error("insert", e)
                }
            })?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn list_all(&self) -> Result<Vec<VoterSummary>, VoterStoreError> {
        let rows = sqlx::query("SELECT voter_id, role FROM voters")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_all", e))?;

        rows.into_iter()
            .map(|row| {
                let raw_id: String = row
                    .try_get("voter_id")
                    .map_err(|e| map_sqlx_error("list_all", e))?;
                let role: String = row
                    .try_get("role")
                    .map_err(|e| map_sqlx_error("list_all", e))?;
                summary_from_columns(raw_id, role)
            })
            .collect()
    }
}

/// Every stored row must surface; an unusable id fails the listing.
fn summary_from_columns(raw_id: String, role: String) -> Result<VoterSummary, VoterStoreError> {
    let voter_id = VoterId::parse(raw_id.as_str()).map_err(|e| {
        VoterStoreError::Backend(format!("unusable voter_id {raw_id:?} in voters table: {e}"))
    })?;
    Ok(VoterSummary {
        voter_id,
        role: Role::new(role),
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> VoterStoreError {
    match err {
        sqlx::Error::Database(db_err) => VoterStoreError::Backend(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            VoterStoreError::Backend(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            VoterStoreError::Backend(format!("connection pool timed out in {}", operation))
        }
        _ => VoterStoreError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}
