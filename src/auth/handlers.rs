use crate::auth::bearer::extract_bearer_token;
use crate::error::Result;
use crate::models::{CredentialsPayload, LoginResponse, OkResponse};
use crate::services::{auth_service::LoginRequest, user_service::CreateUserRequest};
use crate::AppState;
use axum::{body::Bytes, extract::State, http::HeaderMap, Json};

/// POST /api/auth/register
pub async fn register_handler(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<OkResponse>> {
    let payload = CredentialsPayload::from_body(&body).normalized();

    let request = CreateUserRequest {
        email: payload.email,
        password: payload.password,
    };

    let user = app_state.user_service.create_user(request).await?;
    tracing::info!(email = %user.email, "User registered");

    Ok(Json(OkResponse::ok()))
}

/// POST /api/auth/login
pub async fn login_handler(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoginResponse>> {
    let payload = CredentialsPayload::from_body(&body).normalized();

    let request = LoginRequest {
        email: payload.email,
        password: payload.password,
    };

    let outcome = app_state.auth_service.login(request).await?;
    tracing::info!(email = %outcome.user.email, "User logged in");

    Ok(Json(LoginResponse {
        ok: true,
        token: outcome.token,
    }))
}

/// POST /api/auth/logout
///
/// Nothing is stored server-side, so this only acknowledges the client.
pub async fn logout_handler(headers: HeaderMap) -> Json<OkResponse> {
    match extract_bearer_token(&headers) {
        Ok(_) => tracing::debug!("Logout with bearer token"),
        Err(e) => tracing::debug!("Logout without usable token: {}", e),
    }
    Json(OkResponse::ok())
}
