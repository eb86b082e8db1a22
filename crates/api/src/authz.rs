//! API-side authorization guard.
//!
//! Handlers for privileged operations call this before touching the store.

use ballotgate_auth::AuthError;

use crate::context::PrincipalContext;

pub fn require_admin(principal: &PrincipalContext) -> Result<(), AuthError> {
    ballotgate_auth::require_admin(principal.principal())
}
