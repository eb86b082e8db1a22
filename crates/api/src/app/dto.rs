use serde::{Deserialize, Serialize};

use ballotgate_auth::Role;

// -------------------------
// Request DTOs
// -------------------------

/// Query string of `GET /login`. Missing fields read as empty and fail as
/// invalid credentials.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub voter_id: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterVoterRequest {
    pub voter_id: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl StatusResponse {
    pub fn success(message: &'static str) -> Self {
        Self {
            status: "success",
            message,
        }
    }
}
