use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ballotgate_core::VoterId;

use crate::{AuthError, Role};

/// Claim set carried by a session token.
///
/// Timestamps are JWT numeric dates (whole seconds since the Unix epoch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub voter_id: VoterId,
    pub role: Role,

    /// Issued-at.
    pub iat: i64,

    /// Expiration. The token is rejected from this second on.
    pub exp: i64,
}

impl SessionClaims {
    pub fn issue(voter_id: VoterId, role: Role, issued_at: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        let iat = issued_at.timestamp();
        Self {
            voter_id,
            role,
            iat,
            exp: iat.saturating_add(ttl.num_seconds()),
        }
    }
}

/// Deterministically validate session claims against `now`.
///
/// Note: this validates the *claims* only. Signature verification happens in
/// [`crate::SessionTokenCodec`] before this is called.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), AuthError> {
    if claims.exp <= claims.iat {
        return Err(AuthError::InvalidToken);
    }
    if now.timestamp() >= claims.exp {
        return Err(AuthError::TokenExpired);
    }
    Ok(())
}
