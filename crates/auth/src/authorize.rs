use crate::{AuthError, Principal};

/// Gate for administrative operations.
///
/// - No IO
/// - No panics
pub fn require_admin(principal: &Principal) -> Result<(), AuthError> {
    if principal.role.is_admin() {
        Ok(())
    } else {
        tracing::debug!(voter_id = %principal.voter_id, role = %principal.role, "admin gate denied");
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use ballotgate_core::VoterId;

    use super::*;
    use crate::Role;

    fn principal(role: &'static str) -> Principal {
        Principal::new(VoterId::parse("p1").unwrap(), Role::new(role))
    }

    #[test]
    fn admin_passes() {
        assert_eq!(require_admin(&principal("admin")), Ok(()));
    }

    #[test]
    fn everyone_else_is_forbidden() {
        for role in ["voter", "", "ADMIN", "superuser"] {
            assert_eq!(require_admin(&principal(role)), Err(AuthError::Forbidden));
        }
    }
}
