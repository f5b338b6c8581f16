use scout_common::api::{CreateReportData, ReportsQuery, ReportsResponse, VerifyResponse};
use scout_common::Report;

use crate::api_client::ApiClient;
use crate::error::Result;

/// `/reports/{id}` with the id as a single path segment.
fn report_path(id: &str) -> String {
    format!("/reports/{}", urlencoding::encode(id))
}

/// Report endpoints. Filtering semantics belong to the server; the query is
/// forwarded as given.
#[derive(Clone)]
pub struct ReportService {
    client: ApiClient,
}

impl ReportService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn get_reports(&self, query: &ReportsQuery) -> Result<ReportsResponse> {
        self.client.get_with_query("/reports", query)
    }

    pub fn get_report_by_id(&self, id: &str) -> Result<Report> {
        self.client.get(&report_path(id))
    }

    pub fn create_report(&self, data: &CreateReportData) -> Result<Report> {
        self.client.post("/reports", data)
    }

    /// Not deduplicated here: calling twice sends two requests and the
    /// server decides whether the second counts.
    pub fn verify_report(&self, id: &str) -> Result<VerifyResponse> {
        self.client.put(&format!("{}/verify", report_path(id)))
    }

    pub fn delete_report(&self, id: &str) -> Result<()> {
        self.client.delete(&report_path(id))
    }
}
