//! Registration, login and account listing endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::account::AccountName;
use crate::infrastructure::account::{LoginRequest, RegisterRequest};

pub const REGISTERED_MESSAGE: &str = "User registered successfully!";
pub const LOGGED_IN_MESSAGE: &str = "Login successful!";

/// Create the account router
pub fn create_accounts_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users", get(list_users))
}

/// Registration body. Only `email` and `password` are required.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state
        .credential_service
        .register(RegisterRequest {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new(REGISTERED_MESSAGE))))
}

/// POST /login
///
/// Confirms the credentials only; no token or session is issued.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .credential_service
        .login(LoginRequest {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(MessageResponse::new(LOGGED_IN_MESSAGE)))
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<AccountName>>, ApiError> {
    let names = state.credential_service.list_names().await?;
    Ok(Json(names))
}
