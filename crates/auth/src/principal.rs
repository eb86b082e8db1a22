use ballotgate_core::VoterId;

use crate::{Role, SessionClaims};

/// The authenticated caller of a request, as asserted by a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub voter_id: VoterId,
    pub role: Role,
}

impl Principal {
    pub fn new(voter_id: VoterId, role: Role) -> Self {
        Self { voter_id, role }
    }
}

impl From<SessionClaims> for Principal {
    fn from(claims: SessionClaims) -> Self {
        Self {
            voter_id: claims.voter_id,
            role: claims.role,
        }
    }
}
