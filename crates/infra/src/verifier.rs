//! Store-backed credential verification.

use thiserror::Error;

use ballotgate_auth::{AuthError, Password, Principal, verify_credentials};
use ballotgate_core::VoterId;

use crate::voter_store::{VoterStore, VoterStoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] VoterStoreError),
}

/// Checks a claimed identity and secret against the identity store.
///
/// Read-only: one lookup per call, no retries.
#[derive(Debug, Clone)]
pub struct CredentialVerifier<S> {
    store: S,
}

impl<S: VoterStore> CredentialVerifier<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Return the stored identity and role when `voter_id` / `password`
    /// match a record.
    ///
    /// Identities that could never have been registered (empty, malformed)
    /// fail the same way as an unknown identity.
    pub async fn verify(&self, voter_id: &str, password: &Password) -> Result<Principal, VerifyError> {
        let Ok(voter_id) = VoterId::parse(voter_id) else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if password.is_empty() {
            return Err(AuthError::InvalidCredentials.into());
        }

        let record = self.store.find_by_voter_id(&voter_id).await?;
        let role = verify_credentials(
            record.as_ref().map(|r| (&r.password, &r.role)),
            password,
        )?;

        // The token names the stored identity, never the presented string.
        let voter_id = record.map(|r| r.voter_id).unwrap_or(voter_id);
        Ok(Principal::new(voter_id, role))
    }
}
