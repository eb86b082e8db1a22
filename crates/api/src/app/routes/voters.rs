//! Voter administration (admin only).

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};

use ballotgate_infra::VoterSummary;

use crate::app::dto::{RegisterVoterRequest, StatusResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

/// POST /register_voter
pub async fn register_voter(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<RegisterVoterRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    authz::require_admin(&principal)?;

    let Json(body) = body.map_err(|e| ApiError::validation(e.body_text()))?;
    services.register_voter(body).await?;

    Ok(Json(StatusResponse::success("Voter Registered Successfully")))
}

/// GET /get_voters
pub async fn get_voters(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<Json<Vec<VoterSummary>>, ApiError> {
    authz::require_admin(&principal)?;

    Ok(Json(services.list_voters().await?))
}
