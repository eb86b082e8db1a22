use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    Json,
};

use ballotgate_auth::Password;

use crate::app::dto::{LoginQuery, LoginResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// GET /login?voter_id=..&password=..
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<LoginQuery>,
) -> Result<Json<LoginResponse>, ApiError> {
    let password = Password::new(query.password);
    let response = services.login(&query.voter_id, &password).await?;
    Ok(Json(response))
}
