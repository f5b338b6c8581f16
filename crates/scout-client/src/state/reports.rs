use chrono::{DateTime, Utc};
use scout_common::{Report, ReportPatch};

/// Reports in display order (newest first) plus UI feedback flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportState {
    reports: Vec<Report>,
    is_loading: bool,
    error: Option<String>,
}

impl ReportState {
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn set_reports(&mut self, reports: Vec<Report>) {
        self.reports = reports;
        self.error = None;
    }

    /// Prepend. Ids are not checked for duplicates.
    pub fn add_report(&mut self, report: Report) {
        self.reports.insert(0, report);
    }

    pub fn update_report(&mut self, id: &str, patch: &ReportPatch) {
        for report in self.reports.iter_mut().filter(|r| r.id == id) {
            report.apply(patch);
        }
    }

    pub fn remove_report(&mut self, id: &str) {
        self.reports.retain(|r| r.id != id);
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn clear_reports(&mut self) {
        self.reports.clear();
        self.error = None;
    }

    /// Drop reports whose expiry has passed. Returns how many were removed.
    pub fn evict_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.reports.len();
        self.reports.retain(|r| !r.is_expired(now));
        before - self.reports.len()
    }
}
