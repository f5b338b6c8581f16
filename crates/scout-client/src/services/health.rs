use scout_common::api::HealthResponse;

use crate::api_client::ApiClient;
use crate::error::Result;

/// Liveness check. The endpoint sits at the server root, outside `/api/v1`.
#[derive(Clone)]
pub struct HealthService {
    client: ApiClient,
}

impl HealthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn check(&self) -> Result<HealthResponse> {
        self.client.get_root("/health")
    }
}
