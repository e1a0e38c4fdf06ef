use axum::{extract::FromRequestParts, http::HeaderMap, http::request::Parts};

use crate::db::AppState;
use crate::error::AppError;
use crate::session::SESSION_COOKIE;
use crate::util::extract_cookie;

/// Check the session cookie against the session store.
///
/// A pure lookup: the token either maps to a live admin session or the
/// request is unauthorized.
fn authenticate_admin(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let token = extract_cookie(headers, SESSION_COOKIE).ok_or(AppError::Unauthorized)?;
    if !state.sessions.is_admin(token) {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

/// Request guard for catalog write endpoints.
///
/// Handlers take this as an argument; extraction fails with 401 unless
/// the request carries a live admin session cookie. No session data is
/// passed downstream because there is exactly one admin identity.
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate_admin(state, &parts.headers)?;
        Ok(RequireAdmin)
    }
}
