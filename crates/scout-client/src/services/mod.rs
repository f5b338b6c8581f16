//! Thin wrappers that map each API operation onto one HTTP call.

mod auth;
mod health;
mod reports;
mod users;

pub use auth::AuthService;
pub use health::HealthService;
pub use reports::ReportService;
pub use users::UserService;

use crate::api_client::ApiClient;

/// All services, sharing one client.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub health: HealthService,
    pub reports: ReportService,
    pub users: UserService,
}

impl Services {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            health: HealthService::new(client.clone()),
            reports: ReportService::new(client.clone()),
            users: UserService::new(client),
        }
    }
}
