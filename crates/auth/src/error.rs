use thiserror::Error;

/// Every way authentication or authorization can fail.
///
/// The `Display` text is the short message shown to callers. It never carries
/// identities, secrets or library error detail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown identity or wrong secret. The two cases are deliberately
    /// indistinguishable.
    #[error("Invalid voter id or password")]
    InvalidCredentials,

    /// No credential header was presented at all.
    #[error("Unauthorized")]
    MissingCredential,

    /// Malformed header, bad encoding, bad signature or bad claims.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Authenticated, but the role does not allow the operation.
    #[error("Only admin can perform this operation")]
    Forbidden,

    /// Signing failed while minting a token.
    #[error("Token could not be issued")]
    Issue(String),
}
