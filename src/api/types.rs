// Request and response bodies for the auth endpoints
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Default)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Pick `email` and `password` out of a JSON object. Each field is read on
    /// its own, so a non-string value only drops that one field.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };
        Self {
            email: field("email"),
            password: field("password"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: u64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ServerErrorResponse {
    pub message: String,
    pub error: String,
}
