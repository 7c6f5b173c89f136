use super::types::*;
use super::ApiState;
use crate::account::RegistryError;
use axum::{
    body::Bytes,
    debug_handler,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};

/// Errors surfaced at the HTTP boundary
#[derive(Debug)]
pub enum ApiError {
    Registry(RegistryError),
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        ApiError::Registry(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Registry(err) = self;
        match err {
            RegistryError::Validation => message(StatusCode::BAD_REQUEST, &err),
            RegistryError::Conflict => message(StatusCode::CONFLICT, &err),
            other => {
                error!("Signup failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ServerErrorResponse {
                        message: "Server error during signup.".to_string(),
                        error: other.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

fn message(status: StatusCode, err: &RegistryError) -> Response {
    (
        status,
        Json(MessageResponse {
            message: err.to_string(),
        }),
    )
        .into_response()
}

/// POST /api/auth/signup
#[debug_handler]
pub async fn handle_signup(
    State(state): State<ApiState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!("Unreadable signup body: {}", rejection.body_text());
            return Err(RegistryError::Validation.into());
        }
    };

    let user_id = state
        .registry
        .register(
            req.username.as_deref().unwrap_or_default(),
            req.email.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully!".to_string(),
            user_id,
        }),
    ))
}

/// POST /api/auth/login
///
/// Accepts any body. Unparseable input is treated as an empty request.
#[debug_handler]
pub async fn handle_login(State(state): State<ApiState>, body: Bytes) -> Json<MessageResponse> {
    let req = match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(value) => LoginRequest::from_json(&value),
        Err(e) => {
            debug!("Login body not parsed: {}", e);
            LoginRequest::default()
        }
    };

    let ack = state
        .registry
        .authenticate(req.email.as_deref(), req.password.as_deref());

    Json(MessageResponse {
        message: ack.message,
    })
}
