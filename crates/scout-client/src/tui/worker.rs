use std::sync::mpsc;
use std::thread;

use scout_common::api::{
    AuthResponse, CreateReportData, LoginCredentials, RefreshResponse, RegisterData,
    ReportsQuery, ReportsResponse, VerifyResponse,
};
use scout_common::{Report, UserProfile};

use super::event::Event;
use crate::error::Result;
use crate::services::Services;

/// A call a screen wants made.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    FetchReports(ReportsQuery),
    CreateReport(CreateReportData),
    VerifyReport(String),
    DeleteReport(String),
    Login(LoginCredentials),
    Register(RegisterData),
    RefreshToken(String),
    LoadProfile,
}

impl ApiRequest {
    /// Short name for logs. Bodies stay out of logs since some carry passwords.
    pub fn name(&self) -> &'static str {
        match self {
            ApiRequest::FetchReports(_) => "fetch_reports",
            ApiRequest::CreateReport(_) => "create_report",
            ApiRequest::VerifyReport(_) => "verify_report",
            ApiRequest::DeleteReport(_) => "delete_report",
            ApiRequest::Login(_) => "login",
            ApiRequest::Register(_) => "register",
            ApiRequest::RefreshToken(_) => "refresh_token",
            ApiRequest::LoadProfile => "load_profile",
        }
    }
}

/// The outcome of an [`ApiRequest`], handed back to the UI thread.
#[derive(Debug)]
pub enum ApiEvent {
    ReportsLoaded(Result<ReportsResponse>),
    ReportCreated(Result<Report>),
    ReportVerified { id: String, result: Result<VerifyResponse> },
    ReportDeleted { id: String, result: Result<()> },
    Authenticated(Result<AuthResponse>),
    TokenRefreshed(Result<RefreshResponse>),
    ProfileLoaded(Result<UserProfile>),
}

/// Run one call against the services. Blocks for at most the client timeout.
pub fn execute(services: &Services, request: ApiRequest) -> ApiEvent {
    tracing::debug!(call = request.name(), "api call");
    match request {
        ApiRequest::FetchReports(query) => {
            ApiEvent::ReportsLoaded(services.reports.get_reports(&query))
        }
        ApiRequest::CreateReport(data) => {
            ApiEvent::ReportCreated(services.reports.create_report(&data))
        }
        ApiRequest::VerifyReport(id) => {
            let result = services.reports.verify_report(&id);
            ApiEvent::ReportVerified { id, result }
        }
        ApiRequest::DeleteReport(id) => {
            let result = services.reports.delete_report(&id);
            ApiEvent::ReportDeleted { id, result }
        }
        ApiRequest::Login(credentials) => {
            ApiEvent::Authenticated(services.auth.login(&credentials))
        }
        ApiRequest::Register(data) => ApiEvent::Authenticated(services.auth.register(&data)),
        ApiRequest::RefreshToken(refresh) => {
            ApiEvent::TokenRefreshed(services.auth.refresh_token(&refresh))
        }
        ApiRequest::LoadProfile => ApiEvent::ProfileLoaded(services.users.get_me()),
    }
}

/// Run the call on its own thread and post the outcome to the event queue.
/// Calls are independent; their results arrive in whatever order they finish.
pub fn spawn(services: Services, request: ApiRequest, sender: mpsc::Sender<Event>) {
    thread::spawn(move || {
        let outcome = execute(&services, request);
        if sender.send(Event::Api(outcome)).is_err() {
            tracing::debug!("event loop gone, dropping api result");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::{ApiClient, DEFAULT_TIMEOUT};
    use crate::testing::StubServer;
    use std::time::Duration;

    #[test]
    fn verify_outcome_keeps_report_id() {
        let server = StubServer::respond(
            200,
            r#"{"id":"r1","verification_count":2,"is_verified_by_me":true}"#,
        );
        let services = Services::new(ApiClient::new(&server.base_url(), DEFAULT_TIMEOUT).unwrap());

        match execute(&services, ApiRequest::VerifyReport("r1".to_string())) {
            ApiEvent::ReportVerified { id, result } => {
                assert_eq!(id, "r1");
                assert_eq!(result.unwrap().verification_count, 2);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn spawned_call_posts_to_event_queue() {
        let server = StubServer::respond(204, "");
        let services = Services::new(ApiClient::new(&server.base_url(), DEFAULT_TIMEOUT).unwrap());
        let (tx, rx) = mpsc::channel();

        spawn(services, ApiRequest::DeleteReport("r9".to_string()), tx);

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            Event::Api(ApiEvent::ReportDeleted { id, result }) => {
                assert_eq!(id, "r9");
                assert!(result.is_ok());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
