//! Infrastructure layer: identity store, credential lookup, configuration.

pub mod bootstrap;
pub mod config;
pub mod verifier;
pub mod voter_store;

pub use bootstrap::{BootstrapOutcome, bootstrap_admin};
pub use config::{AppConfig, BootstrapAdmin, ConfigError, DatabaseConfig};
pub use verifier::{CredentialVerifier, VerifyError};
pub use voter_store::{
    InMemoryVoterStore, MySqlVoterStore, VoterRecord, VoterStore, VoterStoreError, VoterSummary,
};
