use std::sync::RwLock;

use ballotgate_core::VoterId;

use super::r#trait::{VoterRecord, VoterStore, VoterStoreError, VoterSummary};

/// In-memory voter store.
///
/// Intended for tests/dev. Records are listed in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryVoterStore {
    voters: RwLock<Vec<VoterRecord>>,
}

impl InMemoryVoterStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> VoterStoreError {
        VoterStoreError::Backend("in-memory voter store lock poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl VoterStore for InMemoryVoterStore {
    async fn find_by_voter_id(&self, voter_id: &VoterId) -> Result<Option<VoterRecord>, VoterStoreError> {
        let voters = self.voters.read().map_err(|_| Self::poisoned())?;
        Ok(voters.iter().find(|v| &v.voter_id == voter_id).cloned())
    }

    async fn insert(&self, record: VoterRecord) -> Result<(), VoterStoreError> {
        let mut voters = self.voters.write().map_err(|_| Self::poisoned())?;
        if voters.iter().any(|v| v.voter_id == record.voter_id) {
            return Err(VoterStoreError::Duplicate(record.voter_id));
        }
        voters.push(record);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<VoterSummary>, VoterStoreError> {
        let voters = self.voters.read().map_err(|_| Self::poisoned())?;
        Ok(voters.iter().map(VoterRecord::summary).collect())
    }
}
