//! Handlers for the `/auth` resource (register, login, logout, profile).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use noor_core::account::{normalize_email, validate_display_name, validate_email, validate_username};
use noor_core::error::CoreError;
use noor_core::roles::{ROLE_ADMIN, ROLE_USER};
use noor_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account and start a session. Emails listed in `ADMIN_EMAILS`
/// receive the admin role.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let username = input.username.trim().to_string();
    let email = normalize_email(&input.email);
    validate_username(&username)?;
    validate_email(&email)?;
    validate_display_name(input.display_name.as_deref())?;
    validate_password_strength(&input.password, state.config.password_min_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if state.storage.find_user_by_username(&username).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }
    if state.storage.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let role = if state.config.is_admin_email(&email) {
        ROLE_ADMIN
    } else {
        ROLE_USER
    };

    let user = state
        .storage
        .create_user(&CreateUser {
            username,
            email,
            password_hash,
            display_name: input.display_name,
            role: role.to_string(),
        })
        .await?;
    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    let (cookie, response) = start_session(&state, &user)?;
    Ok((
        StatusCode::CREATED,
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(response),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with username + password.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = state
        .storage
        .find_user_by_username(input.username.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    let (cookie, response) = start_session(&state, &user)?;
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(response)))
}

/// POST /api/auth/logout
///
/// Clear the session cookie. Returns 204 No Content. Tokens are stateless,
/// so this works even when the current token has already expired.
pub async fn logout(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cookie = clear_session_cookie(state.config.session_cookie_secure)?;
    Ok((StatusCode::NO_CONTENT, AppendHeaders([(SET_COOKIE, cookie)])))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<UserResponse>> {
    let user = load_current_user(&state, &auth).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/auth/me
///
/// Update the caller's email and/or display name.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    let email = input.email.as_deref().map(normalize_email);
    if let Some(email) = &email {
        validate_email(email)?;
        if let Some(other) = state.storage.find_user_by_email(email).await? {
            if other.id != auth.user_id {
                return Err(AppError::Core(CoreError::Conflict(
                    "Email is already registered".into(),
                )));
            }
        }
    }
    validate_display_name(input.display_name.as_deref())?;

    let update = UpdateUser {
        email,
        display_name: input.display_name,
    };
    let user = state
        .storage
        .update_user(auth.user_id, &update)
        .await?
        .ok_or_else(user_gone)?;
    Ok(Json(UserResponse::from(&user)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a token for `user` and build the cookie plus response body.
fn start_session(state: &AppState, user: &User) -> AppResult<(HeaderValue, AuthResponse)> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = session_cookie(
        &access_token,
        jwt.expires_in_secs(),
        state.config.session_cookie_secure,
    )?;

    Ok((
        cookie,
        AuthResponse {
            access_token,
            token_type: "Bearer",
            expires_in: jwt.expires_in_secs(),
            user: UserResponse::from(user),
        },
    ))
}

async fn load_current_user(state: &AppState, auth: &AuthUser) -> AppResult<User> {
    state
        .storage
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or_else(user_gone)
}

fn user_gone() -> AppError {
    AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
}
