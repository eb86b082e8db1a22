//! Identity store boundary.
//!
//! The store owns uniqueness of `voter_id` and the natural listing order.
//! Everything above it only sees [`VoterStore`].

pub mod in_memory;
pub mod mysql;
pub mod r#trait;

pub use in_memory::InMemoryVoterStore;
pub use mysql::MySqlVoterStore;
pub use r#trait::{VoterRecord, VoterStore, VoterStoreError, VoterSummary};
