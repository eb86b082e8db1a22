//! Startup seeding of the first administrator.
//!
//! Registration is admin-only, so an empty store needs one admin created out
//! of band. When configured, the composition root calls [`bootstrap_admin`]
//! once before serving.

use ballotgate_auth::{Password, Role};
use ballotgate_core::VoterId;

use crate::voter_store::{VoterRecord, VoterStore, VoterStoreError};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    /// A record with that id already existed and was left untouched.
    AlreadyPresent,
}

pub async fn bootstrap_admin<S: VoterStore + ?Sized>(
    store: &S,
    voter_id: VoterId,
    password: Password,
) -> Result<BootstrapOutcome, VoterStoreError> {
    if let Some(existing) = store.find_by_voter_id(&voter_id).await? {
        if !existing.role.is_admin() {
            tracing::warn!(
                voter_id = %voter_id,
                role = %existing.role,
                "bootstrap admin id is registered without the admin role"
            );
        }
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    match store
        .insert(VoterRecord::new(voter_id.clone(), password, Role::ADMIN))
        .await
    {
        Ok(()) => {
            tracing::info!(voter_id = %voter_id, "bootstrap admin created");
            Ok(BootstrapOutcome::Created)
        }
        Err(VoterStoreError::Duplicate(_)) => Ok(BootstrapOutcome::AlreadyPresent),
        Err(e) => Err(e),
    }
}
