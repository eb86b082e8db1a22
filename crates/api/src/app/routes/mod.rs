use axum::{routing::{get, post}, Router};

pub mod auth;
pub mod system;
pub mod voters;

/// Routes reachable without a token.
pub fn public_router() -> Router {
    Router::new().route("/login", get(auth::login))
}

/// Routes behind the bearer-token middleware.
pub fn protected_router() -> Router {
    Router::new()
        .route("/register_voter", post(voters::register_voter))
        .route("/get_voters", get(voters::get_voters))
}
