//! The `noor_session` cookie: builds `Set-Cookie` values and reads the token
//! back from a request's `Cookie` headers.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use cookie::{Cookie, SameSite};

use crate::error::{AppError, AppResult};

pub const SESSION_COOKIE: &str = "noor_session";

/// `Set-Cookie` value carrying `token` for `max_age_secs`.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> AppResult<HeaderValue> {
    to_header(build(token.to_string(), max_age_secs, secure))
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> AppResult<HeaderValue> {
    to_header(build(String::new(), 0, secure))
}

fn build(value: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::seconds(max_age_secs))
        .build()
}

fn to_header(cookie: Cookie<'_>) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {e}")))
}

/// The session token from the request's `Cookie` headers, if present and non-empty.
///
/// Malformed pairs in the header are skipped.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|value| !value.is_empty())
}
