use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role tag attached to every voter record and session token.
///
/// Roles are opaque strings. Exactly one value, [`Role::ADMIN`], is
/// privileged; anything else is treated as an ordinary voter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));
    pub const VOTER: Role = Role(Cow::Borrowed("voter"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        self.as_str() == Self::ADMIN.as_str()
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::VOTER
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
