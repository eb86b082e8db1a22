//! `ballotgate-auth` — credential verification and session tokens.
//!
//! This crate is intentionally decoupled from HTTP and storage: callers hand
//! in the stored credential they looked up and the raw header value they
//! received.

pub mod authorize;
pub mod bearer;
pub mod claims;
pub mod credentials;
pub mod error;
pub mod principal;
pub mod roles;
pub mod token;

pub use authorize::require_admin;
pub use bearer::extract_bearer;
pub use claims::{SessionClaims, validate_claims};
pub use credentials::{Password, secrets_match, verify_credentials};
pub use error::AuthError;
pub use principal::Principal;
pub use roles::Role;
pub use token::SessionTokenCodec;
