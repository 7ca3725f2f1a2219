use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, MeResponse, RefreshRequest, RegisterRequest},
        password::verify_password,
        repo_types::{PublicUser, User},
        services::{is_valid_email, JwtKeys},
        AuthUser,
    },
    error::{reject, ModelError},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn issue_tokens(state: &AppState, user: &User) -> Result<AuthResponse, (StatusCode, String)> {
    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(&user.id).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    let refresh_token = keys.sign_refresh(&user.id).map_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, String)> {
    let user = User::create(
        state.store.as_ref(),
        &payload.username,
        &payload.email,
        &payload.password,
    )
    .await
    .map_err(reject)?;

    let response = issue_tokens(&state, &user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let user = match User::find_by_email(state.store.as_ref(), &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => return Err(reject(e)),
    };

    let ok = match verify_password(&payload.password, &user.hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "verify_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    info!(user_id = %user.id, "user logged in");
    Ok(Json(issue_tokens(&state, &user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| (StatusCode::UNAUTHORIZED, format!("{}", e)))?;

    let user = User::find_by_id(state.store.as_ref(), &claims.sub)
        .await
        .map_err(|e| match e {
            ModelError::NotFound { .. } => (StatusCode::UNAUTHORIZED, "User not found".to_string()),
            e => reject(e),
        })?;

    Ok(Json(issue_tokens(&state, &user)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MeResponse>, (StatusCode, String)> {
    let user = state
        .store
        .find_user_by_id(&user_id)
        .await
        .map_err(reject)?
        .ok_or_else(|| {
            error!(%user_id, "user not found");
            (StatusCode::UNAUTHORIZED, "User not found".to_string())
        })?;

    Ok(Json(MeResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        avatar: user.avatar,
    }))
}

#[cfg(test)]
mod me_tests {
    use super::*;

    #[test]
    fn test_me_response_serialization() {
        let response = MeResponse {
            id: crate::ids::generate(),
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            avatar: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("\"avatar\":null"));
    }

    #[test]
    fn public_user_hides_credentials() {
        let user = User {
            id: "user12345".into(),
            username: "testuser".into(),
            email: "test@example.com".into(),
            hash: "hash".into(),
            salt: "salt".into(),
            avatar: Some("/avatars/1.png".into()),
            created_at: time::OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(PublicUser::from(&user)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "user12345", "username": "testuser", "avatar": "/avatars/1.png" })
        );

        let full = serde_json::to_string(&user).unwrap();
        assert!(!full.contains("\"hash\""));
        assert!(!full.contains("\"salt\""));
    }
}
