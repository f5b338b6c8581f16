use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::geo::Location;
use crate::error::{CommonError, CommonResult};

/// An inspector sighting as returned by the server.
///
/// Ids are always server-assigned. `username` is a snapshot taken when the
/// report was created, not a live join against the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    #[serde(default)]
    pub transport_line: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub verification_count: u32,
    pub created_at: String,
    pub expires_at: String,
    pub is_verified_by_me: bool,
}

/// Partial update of a [`Report`]. `None` leaves the field alone.
///
/// The two nullable fields take `Some(None)` to clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPatch {
    pub username: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    pub transport_line: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub verification_count: Option<u32>,
    pub expires_at: Option<String>,
    pub is_verified_by_me: Option<bool>,
}

impl Report {
    pub fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }

    /// Shallow merge: every field set on the patch overwrites this report's.
    pub fn apply(&mut self, patch: &ReportPatch) {
        if let Some(ref username) = patch.username {
            self.username = username.clone();
        }
        if let Some(latitude) = patch.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            self.longitude = longitude;
        }
        if let Some(ref name) = patch.location_name {
            self.location_name = name.clone();
        }
        if let Some(ref line) = patch.transport_line {
            self.transport_line = line.clone();
        }
        if let Some(ref description) = patch.description {
            self.description = description.clone();
        }
        if let Some(count) = patch.verification_count {
            self.verification_count = count;
        }
        if let Some(ref expires_at) = patch.expires_at {
            self.expires_at = expires_at.clone();
        }
        if let Some(verified) = patch.is_verified_by_me {
            self.is_verified_by_me = verified;
        }
    }

    pub fn created_at_utc(&self) -> CommonResult<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    pub fn expires_at_utc(&self) -> CommonResult<DateTime<Utc>> {
        parse_timestamp(&self.expires_at)
    }

    /// A report whose expiry cannot be parsed is never considered expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at_utc()
            .map(|expires| expires <= now)
            .unwrap_or(false)
    }
}

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
pub(crate) fn parse_timestamp(s: &str) -> CommonResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| CommonError::InvalidTimestamp(s.to_string()))
}

#[cfg(test)]
pub(crate) fn sample_report(id: &str) -> Report {
    Report {
        id: id.to_string(),
        user_id: "u1".to_string(),
        username: "commuter".to_string(),
        latitude: -37.8183,
        longitude: 144.9671,
        location_name: "Flinders St".to_string(),
        transport_line: Some("Route 86".to_string()),
        description: None,
        verification_count: 0,
        created_at: "2026-10-19T08:00:00Z".to_string(),
        expires_at: "2026-10-19T09:00:00Z".to_string(),
        is_verified_by_me: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites_only_set_fields() {
        let mut report = sample_report("r1");
        report.apply(&ReportPatch {
            verification_count: Some(3),
            is_verified_by_me: Some(true),
            transport_line: Some(None),
            ..Default::default()
        });
        assert_eq!(report.verification_count, 3);
        assert!(report.is_verified_by_me);
        assert_eq!(report.transport_line, None);
        assert_eq!(report.location_name, "Flinders St");
        assert_eq!(report.username, "commuter");
    }

    #[test]
    fn empty_patch_is_identity() {
        let mut report = sample_report("r1");
        report.apply(&ReportPatch::default());
        assert_eq!(report, sample_report("r1"));
    }

    #[test]
    fn parses_naive_and_offset_timestamps() {
        let a = parse_timestamp("2026-10-19T09:00:00Z").unwrap();
        let b = parse_timestamp("2026-10-19T09:00:00").unwrap();
        let c = parse_timestamp("2026-10-19T20:00:00+11:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn expiry_uses_server_timestamp() {
        let report = sample_report("r1");
        let before = parse_timestamp("2026-10-19T08:59:59Z").unwrap();
        let after = parse_timestamp("2026-10-19T09:00:00Z").unwrap();
        assert!(!report.is_expired(before));
        assert!(report.is_expired(after));

        let mut garbled = sample_report("r2");
        garbled.expires_at = "soon".to_string();
        assert!(!garbled.is_expired(after));
    }

    #[test]
    fn deserializes_server_payload_with_nulls() {
        let json = r#"{
            "id": "abc",
            "user_id": "u9",
            "username": "tram_fan",
            "latitude": -37.81,
            "longitude": 144.96,
            "location_name": "Flinders St",
            "transport_line": null,
            "description": null,
            "verification_count": 2,
            "created_at": "2026-10-19T08:00:00",
            "expires_at": "2026-10-19T09:00:00",
            "is_verified_by_me": true
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.id, "abc");
        assert_eq!(report.transport_line, None);
        assert_eq!(report.verification_count, 2);
        assert!(report.is_verified_by_me);
    }
}
