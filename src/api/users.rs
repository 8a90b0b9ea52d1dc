//! Registration, login and session endpoints

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, LoginRequest, LoginResponse, RegisterResponse, SessionInfo},
    AppState,
};

use super::{AuthenticatedUser, ValidatedJson};

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(user): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let user_id = state.services.users.register(user).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id,
        }),
    ))
}

/// Log in and receive a session token
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let session = state
        .services
        .users
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_at: session.expires_at,
    }))
}

/// Identity behind the presented token
#[utoipa::path(
    get,
    path = "/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current session", body = SessionInfo),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    )
)]
pub async fn me(AuthenticatedUser(claims): AuthenticatedUser) -> AppResult<Json<SessionInfo>> {
    let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
        .ok_or_else(|| AppError::Authentication("Invalid token expiry".to_string()))?;

    Ok(Json(SessionInfo {
        user_id: claims.user_id,
        email: claims.email,
        expires_at,
    }))
}
