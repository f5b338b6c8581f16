use scout_common::api::{
    AuthResponse, LoginCredentials, RefreshRequest, RefreshResponse, RegisterData,
};

use crate::api_client::ApiClient;
use crate::error::Result;

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        self.client.post("/auth/login", credentials)
    }

    pub fn register(&self, data: &RegisterData) -> Result<AuthResponse> {
        self.client.post("/auth/register", data)
    }

    pub fn refresh_token(&self, refresh_token: &str) -> Result<RefreshResponse> {
        self.client.post(
            "/auth/refresh",
            &RefreshRequest {
                refresh_token: refresh_token.to_string(),
            },
        )
    }
}
