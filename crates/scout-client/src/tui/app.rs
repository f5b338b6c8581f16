use std::time::{Duration, Instant};

use chrono::Utc;
use scout_common::api::{CreateReportData, LoginCredentials, RegisterData, ReportsQuery};
use scout_common::{Location, Report, ReportPatch, UserProfile};

use super::form::{Form, TextField};
use super::navigator::Tab;
use super::theme::TuiTheme;
use super::widgets::map_view::{MapReadyLatch, MapSignal};
use super::worker::{ApiEvent, ApiRequest};
use crate::api_client::SharedToken;
use crate::config::Config;
use crate::error::ScoutError;
use crate::location::LocationProvider;
use crate::state::AppState;

/// Share of the current span moved per arrow key press
const PAN_STEP: f64 = 0.25;
const ZOOM_IN: f64 = 0.5;
const ZOOM_OUT: f64 = 2.0;

/// Main application state
pub struct App {
    /// State containers; the only source of truth for rendering
    pub state: AppState,
    pub config: Config,
    pub theme: TuiTheme,
    pub tab: Tab,
    pub running: bool,
    pub status_message: Option<StatusMessage>,
    pub popup: Option<Popup>,
    pub map_ready: MapReadyLatch,
    /// Index into the report list
    pub selected_report: usize,
    pub report_form: ReportForm,
    pub auth_form: AuthForm,
    /// Last profile fetched from /users/me
    pub profile: Option<UserProfile>,
    token: SharedToken,
    location: Box<dyn LocationProvider>,
    requests: Vec<ApiRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
    Help,
    ConfirmDelete { id: String, name: String },
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

/// The sighting form on the Report tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportForm {
    pub form: Form,
    pub anonymous: bool,
}

impl ReportForm {
    pub const LOCATION_NAME: usize = 0;
    pub const TRANSPORT_LINE: usize = 1;
    pub const DESCRIPTION: usize = 2;

    fn new() -> Self {
        Self {
            form: Form::new(vec![
                TextField::new("Location"),
                TextField::new("Line"),
                TextField::new("Details"),
            ]),
            anonymous: false,
        }
    }

    /// Body for POST /reports, or `None` while the location name is blank.
    pub fn to_create_data(&self, position: Location) -> Option<CreateReportData> {
        let location_name = self.form.field(Self::LOCATION_NAME).non_empty()?;
        Some(CreateReportData {
            latitude: position.latitude,
            longitude: position.longitude,
            location_name,
            transport_line: self.form.field(Self::TRANSPORT_LINE).non_empty(),
            description: self.form.field(Self::DESCRIPTION).non_empty(),
            is_anonymous: self.anonymous.then_some(true),
        })
    }

    fn reset(&mut self) {
        self.form.clear();
        self.form.editing = false;
        self.anonymous = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Login and register forms on the Profile tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    login: Form,
    register: Form,
}

impl AuthForm {
    fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            login: Form::new(vec![TextField::new("Email"), TextField::masked("Password")]),
            register: Form::new(vec![
                TextField::new("Username"),
                TextField::new("Email"),
                TextField::masked("Password"),
            ]),
        }
    }

    pub fn active(&self) -> &Form {
        match self.mode {
            AuthMode::Login => &self.login,
            AuthMode::Register => &self.register,
        }
    }

    pub fn active_mut(&mut self) -> &mut Form {
        match self.mode {
            AuthMode::Login => &mut self.login,
            AuthMode::Register => &mut self.register,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
    }

    /// The request for the current mode, or the name of the first blank field.
    pub fn to_request(&self) -> std::result::Result<ApiRequest, &'static str> {
        let form = self.active();
        let value = |i: usize| -> std::result::Result<String, &'static str> {
            let field = form.field(i);
            field.non_empty().ok_or(field.label)
        };
        match self.mode {
            AuthMode::Login => Ok(ApiRequest::Login(LoginCredentials {
                email: value(0)?,
                password: value(1)?,
            })),
            AuthMode::Register => Ok(ApiRequest::Register(RegisterData {
                username: value(0)?,
                email: value(1)?,
                password: value(2)?,
            })),
        }
    }

    fn clear_passwords(&mut self) {
        self.login.fields[1].clear();
        self.register.fields[2].clear();
        self.login.editing = false;
        self.register.editing = false;
    }
}

impl App {
    pub fn new(
        config: Config,
        state: AppState,
        token: SharedToken,
        location: Box<dyn LocationProvider>,
    ) -> Self {
        let theme = TuiTheme::from(&config.theme.resolve());
        let tab = config.default_tab;

        let app = Self {
            state,
            config,
            theme,
            tab,
            running: true,
            status_message: None,
            popup: None,
            map_ready: MapReadyLatch::default(),
            selected_report: 0,
            report_form: ReportForm::new(),
            auth_form: AuthForm::new(),
            profile: None,
            token,
            location,
            requests: Vec::new(),
        };
        // The HTTP client only carries a token the auth state knows about.
        app.sync_token();
        app
    }

    /// Queue a call. The event loop hands queued calls to workers after each
    /// event.
    pub fn request(&mut self, request: ApiRequest) {
        self.requests.push(request);
    }

    pub fn take_requests(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Set status message
    pub fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            kind,
            expires_at: Instant::now() + Duration::from_secs(3),
        });
    }

    /// Tick - called periodically for time-based updates
    pub fn tick(&mut self) {
        if let Some(ref msg) = self.status_message {
            if Instant::now() >= msg.expires_at {
                self.status_message = None;
            }
        }

        if let Some(fix) = self.location.poll() {
            tracing::debug!(lat = fix.latitude, lon = fix.longitude, "location fix");
            self.state.map.set_current_location(fix);
        }

        let evicted = self.state.reports.evict_expired(Utc::now());
        if evicted > 0 {
            tracing::debug!(evicted, "dropped expired reports");
            self.clamp_selection();
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// The map is only drawn on its own tab and only with a usable credential.
    pub fn map_visible(&self) -> bool {
        self.tab == Tab::Map && self.config.map.access_token().is_some()
    }

    /// Feed a map lifecycle signal through the ready latch.
    pub fn map_signal(&mut self, signal: MapSignal) {
        if self.map_ready.signal(signal) {
            self.refresh_reports();
        }
    }

    /// Is any text field taking keystrokes right now?
    pub fn is_editing(&self) -> bool {
        match self.tab {
            Tab::Report => self.report_form.form.editing,
            Tab::Profile => !self.state.auth.is_authenticated() && self.auth_form.active().editing,
            Tab::Map => false,
        }
    }

    // Reports

    pub fn reports_query(&self) -> ReportsQuery {
        let center = self.state.map.region_or_default().center();
        let map = &self.config.map;
        ReportsQuery {
            latitude: Some(center.latitude),
            longitude: Some(center.longitude),
            radius: Some(map.search_radius_km),
            limit: Some(map.page_size),
            offset: None,
            min_verifications: (map.min_verifications > 0).then_some(map.min_verifications),
        }
    }

    pub fn refresh_reports(&mut self) {
        self.state.reports.set_loading(true);
        let query = self.reports_query();
        self.request(ApiRequest::FetchReports(query));
    }

    pub fn selected(&self) -> Option<&Report> {
        self.state.reports.reports().get(self.selected_report)
    }

    pub fn select_next(&mut self) {
        if self.selected_report + 1 < self.state.reports.reports().len() {
            self.selected_report += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_report = self.selected_report.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.state.reports.reports().len();
        if self.selected_report >= len {
            self.selected_report = len.saturating_sub(1);
        }
    }

    pub fn verify_selected(&mut self) {
        match self.selected().map(|r| r.id.clone()) {
            Some(id) => self.request(ApiRequest::VerifyReport(id)),
            None => self.set_status("No report selected", StatusKind::Info),
        }
    }

    pub fn confirm_delete_selected(&mut self) {
        match self.selected() {
            Some(report) => {
                self.popup = Some(Popup::ConfirmDelete {
                    id: report.id.clone(),
                    name: report.location_name.clone(),
                });
            }
            None => self.set_status("No report selected", StatusKind::Info),
        }
    }

    pub fn submit_report(&mut self) {
        let position = self.state.map.report_position();
        match self.report_form.to_create_data(position) {
            Some(data) => {
                self.report_form.form.editing = false;
                self.request(ApiRequest::CreateReport(data));
                self.set_status("Sending report…", StatusKind::Info);
            }
            None => self.set_status("Location is required", StatusKind::Error),
        }
    }

    // Map

    pub fn pan(&mut self, lat_steps: f64, lon_steps: f64) {
        let region = self
            .state
            .map
            .region_or_default()
            .panned(lat_steps * PAN_STEP, lon_steps * PAN_STEP);
        self.state.map.set_map_region(region);
    }

    pub fn zoom_in(&mut self) {
        let region = self.state.map.region_or_default().zoomed(ZOOM_IN);
        self.state.map.set_map_region(region);
    }

    pub fn zoom_out(&mut self) {
        let region = self.state.map.region_or_default().zoomed(ZOOM_OUT);
        self.state.map.set_map_region(region);
    }

    pub fn recenter(&mut self) {
        self.state.map.recenter();
        if self.state.map.current_location().is_none() {
            self.set_status("Following location; waiting for a fix", StatusKind::Info);
        }
    }

    // Auth

    pub fn submit_auth(&mut self) {
        match self.auth_form.to_request() {
            Ok(request) => {
                self.auth_form.active_mut().editing = false;
                self.request(request);
            }
            Err(field) => self.set_status(format!("{field} is required"), StatusKind::Error),
        }
    }

    pub fn logout(&mut self) {
        self.state.auth.logout();
        self.profile = None;
        self.sync_token();
        self.set_status("Logged out", StatusKind::Info);
    }

    pub fn load_profile(&mut self) {
        if self.state.auth.is_authenticated() {
            self.request(ApiRequest::LoadProfile);
        } else {
            self.set_status("Log in first", StatusKind::Error);
        }
    }

    pub fn refresh_token(&mut self) {
        match self.state.auth.refresh_token().map(str::to_string) {
            Some(refresh) => self.request(ApiRequest::RefreshToken(refresh)),
            None => self.set_status("Log in first", StatusKind::Error),
        }
    }

    /// Copy the access token into the slot the HTTP client reads.
    fn sync_token(&self) {
        match self.token.write() {
            Ok(mut slot) => *slot = self.state.auth.access_token().map(str::to_string),
            Err(_) => tracing::error!("token lock poisoned"),
        }
    }

    fn report_failure(&mut self, action: &str, err: &ScoutError) {
        tracing::warn!(action, error = %err, "api call failed");
        let text = match err {
            ScoutError::Unauthorized => format!("{action}: log in on the Profile tab"),
            other => format!("{action}: {other}"),
        };
        self.set_status(text, StatusKind::Error);
    }

    /// Push a finished call's result into the state containers.
    pub fn handle_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::ReportsLoaded(result) => {
                self.state.reports.set_loading(false);
                match result {
                    Ok(resp) => {
                        let count = resp.reports.len();
                        self.state.reports.set_reports(resp.reports);
                        self.clamp_selection();
                        tracing::info!(count, total = resp.total, "reports loaded");
                    }
                    Err(err) => {
                        self.state.reports.set_error(Some(err.to_string()));
                        self.report_failure("Loading reports", &err);
                    }
                }
            }
            ApiEvent::ReportCreated(result) => match result {
                Ok(report) => {
                    let name = report.location_name.clone();
                    self.state.reports.add_report(report);
                    self.selected_report = 0;
                    self.report_form.reset();
                    self.set_status(format!("Reported at {name}"), StatusKind::Success);
                }
                Err(err) => self.report_failure("Sending report", &err),
            },
            ApiEvent::ReportVerified { id, result } => match result {
                Ok(resp) => {
                    self.state
                        .reports
                        .update_report(&id, &ReportPatch::from(&resp));
                    self.set_status(
                        format!("Verified ({} total)", resp.verification_count),
                        StatusKind::Success,
                    );
                }
                Err(err) => self.report_failure("Verifying", &err),
            },
            ApiEvent::ReportDeleted { id, result } => match result {
                Ok(()) => {
                    self.state.reports.remove_report(&id);
                    self.clamp_selection();
                    self.set_status("Report deleted", StatusKind::Success);
                }
                Err(err) => self.report_failure("Deleting", &err),
            },
            ApiEvent::Authenticated(result) => match result {
                Ok(resp) => {
                    let username = resp.user.username.clone();
                    self.profile = None;
                    self.state
                        .auth
                        .login(resp.user, resp.access_token, resp.refresh_token);
                    self.sync_token();
                    self.auth_form.clear_passwords();
                    tracing::info!(%username, "logged in");
                    self.set_status(format!("Logged in as {username}"), StatusKind::Success);
                }
                Err(err) => {
                    let action = match self.auth_form.mode {
                        AuthMode::Login => "Login",
                        AuthMode::Register => "Registration",
                    };
                    self.report_failure(action, &err);
                }
            },
            ApiEvent::TokenRefreshed(result) => match result {
                Ok(resp) => {
                    self.state.auth.set_access_token(resp.access_token);
                    self.sync_token();
                    self.set_status("Session refreshed", StatusKind::Success);
                }
                Err(err) => self.report_failure("Refreshing session", &err),
            },
            ApiEvent::ProfileLoaded(result) => match result {
                Ok(profile) => {
                    let current = self
                        .state
                        .auth
                        .user()
                        .filter(|_| self.state.auth.is_authenticated())
                        .map(|u| u.id.as_str());
                    if current != Some(profile.id.as_str()) {
                        tracing::debug!(id = %profile.id, "dropping profile for another session");
                        return;
                    }
                    self.state.auth.set_user(profile.clone().into());
                    self.profile = Some(profile);
                }
                Err(err) => self.report_failure("Loading profile", &err),
            },
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, RwLock};

    use super::*;
    use crate::location::{FixedLocation, NoLocation};
    use scout_common::api::{AuthResponse, ReportsResponse, VerifyResponse};
    use scout_common::User;

    pub(crate) fn test_app() -> (App, SharedToken) {
        let mut config = Config::default();
        config.map.access_token = Some("pk.test".to_string());
        let token: SharedToken = Arc::new(RwLock::new(None));
        let app = App::new(config, AppState::default(), token.clone(), Box::new(NoLocation));
        (app, token)
    }

    pub(crate) fn report(id: &str) -> Report {
        Report {
            id: id.to_string(),
            user_id: "u1".to_string(),
            username: "commuter".to_string(),
            latitude: -37.8183,
            longitude: 144.9671,
            location_name: format!("Stop {id}"),
            transport_line: None,
            description: None,
            verification_count: 0,
            created_at: "2026-10-19T08:00:00Z".to_string(),
            expires_at: "2999-01-01T00:00:00Z".to_string(),
            is_verified_by_me: false,
        }
    }

    fn loaded(ids: &[&str]) -> ApiEvent {
        ApiEvent::ReportsLoaded(Ok(ReportsResponse {
            reports: ids.iter().map(|id| report(id)).collect(),
            total: ids.len() as u32,
            limit: 50,
            offset: 0,
        }))
    }

    #[test]
    fn first_map_signal_fetches_once() {
        let (mut app, _) = test_app();
        app.map_signal(MapSignal::DidFinishLoading);
        app.map_signal(MapSignal::Idle);
        app.map_signal(MapSignal::DidFinishRenderingFully);

        let requests = app.take_requests();
        assert_eq!(requests.len(), 1);
        assert!(matches!(requests[0], ApiRequest::FetchReports(_)));
        assert!(app.state.reports.is_loading());
    }

    #[test]
    fn fetch_query_uses_viewport_centre_and_config() {
        let (mut app, _) = test_app();
        app.config.map.min_verifications = 2;
        let query = app.reports_query();
        assert_eq!(query.latitude, Some(-37.8136));
        assert_eq!(query.longitude, Some(144.9631));
        assert_eq!(query.radius, Some(5.0));
        assert_eq!(query.limit, Some(50));
        assert_eq!(query.min_verifications, Some(2));

        app.config.map.min_verifications = 0;
        assert_eq!(app.reports_query().min_verifications, None);
    }

    #[test]
    fn loaded_reports_replace_list_and_stop_loading() {
        let (mut app, _) = test_app();
        app.refresh_reports();
        app.handle_api_event(loaded(&["a", "b"]));
        assert!(!app.state.reports.is_loading());
        assert_eq!(app.state.reports.reports().len(), 2);
    }

    #[test]
    fn failed_fetch_sets_error_flag() {
        let (mut app, _) = test_app();
        app.refresh_reports();
        app.handle_api_event(ApiEvent::ReportsLoaded(Err(ScoutError::Network(
            "timed out".to_string(),
        ))));
        assert!(!app.state.reports.is_loading());
        assert!(app.state.reports.error().unwrap().contains("timed out"));
        assert_eq!(app.status_message.as_ref().unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn verify_patches_counter_of_matching_report() {
        let (mut app, _) = test_app();
        app.handle_api_event(loaded(&["a", "b"]));
        app.selected_report = 1;
        app.verify_selected();
        assert_eq!(
            app.take_requests(),
            vec![ApiRequest::VerifyReport("b".to_string())]
        );

        app.handle_api_event(ApiEvent::ReportVerified {
            id: "b".to_string(),
            result: Ok(VerifyResponse {
                id: "b".to_string(),
                verification_count: 1,
                is_verified_by_me: true,
            }),
        });
        let b = app.state.reports.get("b").unwrap();
        assert_eq!(b.verification_count, 1);
        assert!(b.is_verified_by_me);
    }

    #[test]
    fn delete_goes_through_confirmation() {
        let (mut app, _) = test_app();
        app.handle_api_event(loaded(&["a", "b"]));
        app.selected_report = 1;
        app.confirm_delete_selected();
        assert_eq!(
            app.popup,
            Some(Popup::ConfirmDelete {
                id: "b".to_string(),
                name: "Stop b".to_string()
            })
        );

        app.handle_api_event(ApiEvent::ReportDeleted {
            id: "b".to_string(),
            result: Ok(()),
        });
        assert!(app.state.reports.get("b").is_none());
        assert_eq!(app.selected_report, 0);
    }

    #[test]
    fn created_report_is_prepended_and_form_reset() {
        let (mut app, _) = test_app();
        app.handle_api_event(loaded(&["old"]));
        app.report_form.form.fields[ReportForm::LOCATION_NAME].value = "Flinders St".to_string();
        app.report_form.anonymous = true;
        app.submit_report();

        match app.take_requests().as_slice() {
            [ApiRequest::CreateReport(data)] => {
                assert_eq!(data.location_name, "Flinders St");
                assert_eq!(data.latitude, -37.8136);
                assert_eq!(data.is_anonymous, Some(true));
                assert_eq!(data.transport_line, None);
            }
            other => panic!("unexpected requests: {other:?}"),
        }

        app.handle_api_event(ApiEvent::ReportCreated(Ok(report("new"))));
        let ids: Vec<&str> = app.state.reports.reports().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["new", "old"]);
        assert_eq!(app.report_form.form.field(ReportForm::LOCATION_NAME).value, "");
        assert!(!app.report_form.anonymous);
    }

    #[test]
    fn blank_location_name_is_not_sent() {
        let (mut app, _) = test_app();
        app.submit_report();
        assert!(app.take_requests().is_empty());
        assert_eq!(app.status_message.as_ref().unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn report_uses_device_fix_when_known() {
        let token: SharedToken = Arc::new(RwLock::new(None));
        let mut app = App::new(
            Config::default(),
            AppState::default(),
            token,
            Box::new(FixedLocation::new(Location::new(-37.84, 144.98))),
        );
        app.tick();
        app.report_form.form.fields[ReportForm::LOCATION_NAME].value = "Richmond".to_string();
        app.submit_report();
        match app.take_requests().as_slice() {
            [ApiRequest::CreateReport(data)] => {
                assert_eq!(data.latitude, -37.84);
                assert_eq!(data.longitude, 144.98);
            }
            other => panic!("unexpected requests: {other:?}"),
        }
    }

    #[test]
    fn login_and_logout_drive_shared_token() {
        let (mut app, token) = test_app();
        app.auth_form.active_mut().fields[0].value = "fan@example.com".to_string();
        app.auth_form.active_mut().fields[1].value = "hunter2".to_string();
        app.submit_auth();
        assert_eq!(
            app.take_requests(),
            vec![ApiRequest::Login(LoginCredentials {
                email: "fan@example.com".to_string(),
                password: "hunter2".to_string(),
            })]
        );

        app.handle_api_event(ApiEvent::Authenticated(Ok(AuthResponse {
            access_token: "acc".to_string(),
            refresh_token: "ref".to_string(),
            token_type: "bearer".to_string(),
            user: User {
                id: "u1".to_string(),
                username: "tram_fan".to_string(),
                email: "fan@example.com".to_string(),
            },
        })));
        assert!(app.state.auth.is_authenticated());
        assert_eq!(token.read().unwrap().as_deref(), Some("acc"));
        assert_eq!(app.auth_form.active().field(1).value, "");

        app.logout();
        assert_eq!(app.state.auth, Default::default());
        assert_eq!(*token.read().unwrap(), None);
    }

    fn signed_in(id: &str, name: &str) -> ApiEvent {
        ApiEvent::Authenticated(Ok(AuthResponse {
            access_token: format!("acc-{id}"),
            refresh_token: format!("ref-{id}"),
            token_type: "bearer".to_string(),
            user: User {
                id: id.to_string(),
                username: name.to_string(),
                email: format!("{name}@example.com"),
            },
        }))
    }

    fn profile(id: &str, name: &str, report_count: u32) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            username: name.to_string(),
            email: format!("{name}@example.com"),
            created_at: "2024-01-01T00:00:00".to_string(),
            report_count,
        }
    }

    #[test]
    fn startup_token_slot_follows_auth_state() {
        let token: SharedToken = Arc::new(RwLock::new(Some("env-token".to_string())));
        let app = App::new(
            Config::default(),
            AppState::default(),
            token.clone(),
            Box::new(NoLocation),
        );
        assert!(!app.state.auth.is_authenticated());
        assert_eq!(*token.read().unwrap(), None);
    }

    #[test]
    fn late_profile_after_logout_is_dropped() {
        let (mut app, _) = test_app();
        app.handle_api_event(signed_in("alice", "alice"));
        app.logout();

        app.handle_api_event(ApiEvent::ProfileLoaded(Ok(profile("alice", "alice", 99))));
        assert_eq!(app.state.auth.user(), None);
        assert_eq!(app.profile, None);

        app.handle_api_event(signed_in("bob", "bob"));
        assert_eq!(app.profile, None);
        assert_eq!(app.state.auth.user().map(|u| u.username.as_str()), Some("bob"));

        app.handle_api_event(ApiEvent::ProfileLoaded(Ok(profile("alice", "alice", 99))));
        assert_eq!(app.profile, None);

        app.handle_api_event(ApiEvent::ProfileLoaded(Ok(profile("bob", "bob", 3))));
        assert_eq!(app.profile.as_ref().map(|p| p.report_count), Some(3));
    }

    #[test]
    fn new_login_clears_previous_profile() {
        let (mut app, _) = test_app();
        app.handle_api_event(signed_in("alice", "alice"));
        app.handle_api_event(ApiEvent::ProfileLoaded(Ok(profile("alice", "alice", 5))));
        assert!(app.profile.is_some());

        app.handle_api_event(signed_in("bob", "bob"));
        assert_eq!(app.profile, None);
    }

    #[test]
    fn failed_register_is_labelled_registration() {
        let (mut app, _) = test_app();
        app.auth_form.toggle_mode();
        app.handle_api_event(ApiEvent::Authenticated(Err(ScoutError::Http {
            status: 400,
            message: "Email already registered".to_string(),
        })));
        let msg = app.status_message.take().unwrap();
        assert!(msg.text.starts_with("Registration:"), "{}", msg.text);

        app.auth_form.toggle_mode();
        app.handle_api_event(ApiEvent::Authenticated(Err(ScoutError::Unauthorized)));
        let msg = app.status_message.take().unwrap();
        assert!(msg.text.starts_with("Login:"), "{}", msg.text);
    }

    #[test]
    fn register_requires_every_field() {
        let (mut app, _) = test_app();
        app.auth_form.toggle_mode();
        app.auth_form.active_mut().fields[1].value = "fan@example.com".to_string();
        assert_eq!(app.auth_form.to_request(), Err("Username"));
    }

    #[test]
    fn unauthorized_failure_points_to_profile_tab() {
        let (mut app, _) = test_app();
        app.handle_api_event(ApiEvent::ReportVerified {
            id: "a".to_string(),
            result: Err(ScoutError::Unauthorized),
        });
        let msg = app.status_message.unwrap();
        assert!(msg.text.contains("Profile tab"));
    }

    #[test]
    fn panning_turns_follow_off() {
        let (mut app, _) = test_app();
        assert!(app.state.map.follow_user_location());
        app.pan(1.0, 0.0);
        assert!(!app.state.map.follow_user_location());
        let region = app.state.map.region_or_default();
        assert!(region.latitude > -37.8136);
    }

    #[test]
    fn map_hidden_without_credential() {
        let (mut app, _) = test_app();
        assert!(app.map_visible());
        app.config.map.access_token = None;
        assert!(!app.map_visible());
        app.config.map.access_token = Some("pk.test".to_string());
        app.set_tab(Tab::Report);
        assert!(!app.map_visible());
    }
}
