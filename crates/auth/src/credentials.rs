use serde::{Deserialize, Serialize};

use crate::{AuthError, Role};

/// A voter's secret.
///
/// Stored and compared verbatim (no hashing). All comparisons go through
/// [`secrets_match`] so a hashing scheme can be introduced there alone.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Debug for Password {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// The single place where a presented secret is checked against the stored one.
pub fn secrets_match(stored: &Password, presented: &Password) -> bool {
    stored.expose() == presented.expose()
}

/// Decide a login attempt given the record found for the claimed identity.
///
/// `stored` is `None` when the identity is unknown. That case and a secret
/// mismatch both produce [`AuthError::InvalidCredentials`].
pub fn verify_credentials(
    stored: Option<(&Password, &Role)>,
    presented: &Password,
) -> Result<Role, AuthError> {
    match stored {
        Some((password, role)) if secrets_match(password, presented) => Ok(role.clone()),
        _ => Err(AuthError::InvalidCredentials),
    }
}
