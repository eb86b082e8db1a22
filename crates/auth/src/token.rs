//! HS256 session tokens.
//!
//! Tokens are stateless JWTs: nothing is stored server side and there is no
//! revocation. A token is accepted until its `exp`, checked with zero leeway
//! against the caller-supplied clock.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use ballotgate_core::VoterId;

use crate::{AuthError, Principal, Role, SessionClaims, validate_claims};

/// Default validity window for freshly minted tokens.
pub const DEFAULT_TTL_MINUTES: i64 = 60;

/// Encodes and decodes session tokens with one process-wide signing secret.
#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionTokenCodec {
    /// `ttl` must be positive; a non-positive window yields tokens that never
    /// decode.
    pub fn new(secret_key: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `validate_claims` against an injected clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret_key),
            decoding: DecodingKey::from_secret(secret_key),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn encode(&self, voter_id: &VoterId, role: &Role) -> Result<String, AuthError> {
        self.encode_at(voter_id, role, Utc::now())
    }

    /// Mint a token as if issued at `now`.
    ///
    /// Identical inputs within the same second produce identical tokens.
    pub fn encode_at(
        &self,
        voter_id: &VoterId,
        role: &Role,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = SessionClaims::issue(voter_id.clone(), role.clone(), now, self.ttl);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Issue(e.to_string()))
    }

    pub fn decode(&self, token: &str) -> Result<Principal, AuthError> {
        self.decode_at(token, Utc::now())
    }

    /// Verify `token` and return the identity it asserts, judged at `now`.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, AuthError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "session token rejected");
                AuthError::InvalidToken
            })?;

        validate_claims(&data.claims, now)?;

        Ok(Principal::from(data.claims))
    }
}

impl core::fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
