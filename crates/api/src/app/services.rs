use std::sync::Arc;

use ballotgate_auth::{Password, Role, SessionTokenCodec};
use ballotgate_core::VoterId;
use ballotgate_infra::{
    CredentialVerifier, InMemoryVoterStore, VerifyError, VoterRecord, VoterStore, VoterSummary,
};

use crate::app::dto::{LoginResponse, RegisterVoterRequest};
use crate::app::errors::ApiError;

/// Longest accepted secret; matches the `voters.password` column.
const MAX_PASSWORD_LEN: usize = 255;
/// Longest accepted role tag; matches the `voters.role` column.
const MAX_ROLE_LEN: usize = 32;

/// Everything the handlers need, constructed once by the composition root.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn VoterStore>,
    verifier: CredentialVerifier<Arc<dyn VoterStore>>,
    codec: Arc<SessionTokenCodec>,
}

impl AppServices {
    pub fn new(store: Arc<dyn VoterStore>, codec: SessionTokenCodec) -> Self {
        Self {
            verifier: CredentialVerifier::new(store.clone()),
            store,
            codec: Arc::new(codec),
        }
    }

    /// Services over a fresh in-memory store (dev/tests).
    pub fn in_memory(codec: SessionTokenCodec) -> Self {
        Self::new(Arc::new(InMemoryVoterStore::new()), codec)
    }

    pub fn store(&self) -> Arc<dyn VoterStore> {
        self.store.clone()
    }

    pub fn codec(&self) -> Arc<SessionTokenCodec> {
        self.codec.clone()
    }

    /// Verify credentials and mint a session token for the stored identity
    /// and role.
    pub async fn login(&self, voter_id: &str, password: &Password) -> Result<LoginResponse, ApiError> {
        let principal = match self.verifier.verify(voter_id, password).await {
            Ok(principal) => principal,
            Err(e) => {
                if let VerifyError::Auth(reason) = &e {
                    tracing::info!(reason = %reason, "login rejected");
                }
                return Err(e.into());
            }
        };

        let token = self.codec.encode(&principal.voter_id, &principal.role)?;

        tracing::info!(voter_id = %principal.voter_id, role = %principal.role, "login succeeded");
        Ok(LoginResponse {
            token,
            role: principal.role,
        })
    }

    /// Create a voter record. Authorization is the caller's job.
    pub async fn register_voter(&self, req: RegisterVoterRequest) -> Result<VoterSummary, ApiError> {
        let record = validate_registration(req)?;
        let summary = record.summary();

        self.store.insert(record).await?;

        tracing::info!(voter_id = %summary.voter_id, role = %summary.role, "voter registered");
        Ok(summary)
    }

    pub async fn list_voters(&self) -> Result<Vec<VoterSummary>, ApiError> {
        Ok(self.store.list_all().await?)
    }
}

fn validate_registration(req: RegisterVoterRequest) -> Result<VoterRecord, ApiError> {
    let voter_id = VoterId::parse(req.voter_id)?;

    if req.password.is_empty() {
        return Err(ApiError::validation("password must not be empty"));
    }
    if req.password.chars().count() > MAX_PASSWORD_LEN {
        return Err(ApiError::validation(format!(
            "password must be at most {MAX_PASSWORD_LEN} characters"
        )));
    }

    let role = match req.role {
        None => Role::VOTER,
        Some(role) if role.trim().is_empty() => {
            return Err(ApiError::validation("role must not be empty"));
        }
        Some(role) if role.chars().count() > MAX_ROLE_LEN => {
            return Err(ApiError::validation(format!(
                "role must be at most {MAX_ROLE_LEN} characters"
            )));
        }
        Some(role) => Role::new(role),
    };

    Ok(VoterRecord::new(voter_id, Password::new(req.password), role))
}
