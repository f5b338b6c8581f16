use serde::{Deserialize, Serialize};

use crate::models::{Report, ReportPatch, TokenPair, User};

/// Request body for POST /auth/login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Request body for POST /auth/register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response from POST /auth/login and POST /auth/register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: User,
}

impl AuthResponse {
    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

/// Request body for POST /auth/refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response from POST /auth/refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Query string for GET /reports. Unset filters are left off the URL and the
/// server applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Kilometres around `latitude`/`longitude`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_verifications: Option<u32>,
}

/// Response from GET /reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsResponse {
    pub reports: Vec<Report>,
    pub total: u32,
    pub limit: u32,
    pub offset: u32,
}

/// Request body for POST /reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReportData {
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_anonymous: Option<bool>,
}

/// Response from PUT /reports/{id}/verify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub id: String,
    pub verification_count: u32,
    pub is_verified_by_me: bool,
}

impl From<&VerifyResponse> for ReportPatch {
    fn from(resp: &VerifyResponse) -> Self {
        ReportPatch {
            verification_count: Some(resp.verification_count),
            is_verified_by_me: Some(resp.is_verified_by_me),
            ..Default::default()
        }
    }
}

/// Request body for PUT /users/me. Only the fields being changed are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

/// Response from GET /health
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error body produced by the API. `detail` is a string for handled errors and
/// a list of field errors for request validation failures.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(errors) => errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(serde_json::Value::as_str))
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}
