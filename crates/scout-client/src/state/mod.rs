//! Client-side state containers. Each one is owned by the UI thread and
//! mutated only through its methods.

mod auth;
mod map;
mod reports;

pub use auth::AuthState;
pub use map::MapState;
pub use reports::ReportState;

/// Every container the screens read and write, built once at startup and
/// passed down explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub map: MapState,
    pub reports: ReportState,
    pub auth: AuthState,
}
