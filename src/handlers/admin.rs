use axum::{
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse},
};
use serde::{Deserialize, Serialize};

use crate::crypto::verify_secret;
use crate::db::AppState;
use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::session::SESSION_COOKIE;
use crate::util::{extract_client_ip, extract_cookie};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub is_admin: bool,
}

fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    if input.password.is_empty() {
        return Err(AppError::BadRequest("Password required".into()));
    }

    let ip = extract_client_ip(&headers).unwrap_or_else(|| "unknown".to_string());
    if !state.login_limiter.check(&ip) {
        tracing::warn!("Login rate limit hit from {}", ip);
        return Err(AppError::RateLimited);
    }

    if !verify_secret(&input.password, &state.admin_password_hash) {
        tracing::warn!("Failed admin login attempt from {}", ip);
        return Err(AppError::Unauthorized);
    }

    state.login_limiter.reset(&ip);
    let token = state.sessions.create();

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Json(SuccessResponse { success: true }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = extract_cookie(&headers, SESSION_COOKIE) {
        state.sessions.destroy(token);
    }

    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(SuccessResponse { success: true }),
    )
}

pub async fn session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<SessionResponse> {
    let is_admin = extract_cookie(&headers, SESSION_COOKIE)
        .map(|token| state.sessions.is_admin(token))
        .unwrap_or(false);

    Json(SessionResponse { is_admin })
}
