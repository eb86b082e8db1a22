use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use ballotgate_auth::{Password, Role};
use ballotgate_core::VoterId;

/// A registered principal as persisted in the `voters` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterRecord {
    pub voter_id: VoterId,
    pub password: Password,
    pub role: Role,
}

impl VoterRecord {
    pub fn new(voter_id: VoterId, password: Password, role: Role) -> Self {
        Self { voter_id, password, role }
    }

    pub fn summary(&self) -> VoterSummary {
        VoterSummary {
            voter_id: self.voter_id.clone(),
            role: self.role.clone(),
        }
    }
}

/// Listing view of a record. Never carries the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoterSummary {
    pub voter_id: VoterId,
    pub role: Role,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoterStoreError {
    #[error("voter '{0}' already exists")]
    Duplicate(VoterId),

    /// Any failure of the backing datastore. The detail is for operators only.
    #[error("voter store failure: {0}")]
    Backend(String),
}

/// Identity store collaborator.
///
/// Each call is expected to complete or fail atomically.
#[async_trait::async_trait]
pub trait VoterStore: Send + Sync {
    async fn find_by_voter_id(&self, voter_id: &VoterId) -> Result<Option<VoterRecord>, VoterStoreError>;

    /// Insert a new record. An existing `voter_id` yields
    /// [`VoterStoreError::Duplicate`] and leaves the stored record untouched.
    async fn insert(&self, record: VoterRecord) -> Result<(), VoterStoreError>;

    /// All records, in the store's natural retrieval order.
    async fn list_all(&self) -> Result<Vec<VoterSummary>, VoterStoreError>;
}

#[async_trait::async_trait]
impl<S> VoterStore for Arc<S>
where
    S: VoterStore + ?Sized,
{
    async fn find_by_voter_id(&self, voter_id: &VoterId) -> Result<Option<VoterRecord>, VoterStoreError> {
        (**self).find_by_voter_id(voter_id).await
    }

    async fn insert(&self, record: VoterRecord) -> Result<(), VoterStoreError> {
        (**self).insert(record).await
    }

    async fn list_all(&self) -> Result<Vec<VoterSummary>, VoterStoreError> {
        (**self).list_all().await
    }
}
