use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

/// Span used when a region has to be built around a point with no prior zoom.
pub const DEFAULT_DELTA: f64 = 0.05;

/// A device-derived position fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a `lat,lon` pair, as written on the command line or by a GPS feed.
    pub fn parse(s: &str) -> Option<Self> {
        let (lat, lon) = s.trim().split_once(',')?;
        let latitude: f64 = lat.trim().parse().ok()?;
        let longitude: f64 = lon.trim().parse().ok()?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self::new(latitude, longitude))
    }
}

/// Visible map extent: a centre plus the span shown on each axis.
///
/// Deltas are always positive. Regions built through [`MapRegion::new`] are
/// checked; the struct literal is only used for trusted constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRegion")]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// Unchecked wire shape; deserialized regions go through [`MapRegion::new`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRegion {
    latitude: f64,
    longitude: f64,
    latitude_delta: f64,
    longitude_delta: f64,
}

impl TryFrom<RawRegion> for MapRegion {
    type Error = CommonError;

    fn try_from(raw: RawRegion) -> CommonResult<Self> {
        MapRegion::new(
            raw.latitude,
            raw.longitude,
            raw.latitude_delta,
            raw.longitude_delta,
        )
    }
}

impl Default for MapRegion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl MapRegion {
    /// Melbourne CBD.
    pub const DEFAULT: MapRegion = MapRegion {
        latitude: -37.8136,
        longitude: 144.9631,
        latitude_delta: DEFAULT_DELTA,
        longitude_delta: DEFAULT_DELTA,
    };

    pub fn new(
        latitude: f64,
        longitude: f64,
        latitude_delta: f64,
        longitude_delta: f64,
    ) -> CommonResult<Self> {
        for (name, delta) in [
            ("latitudeDelta", latitude_delta),
            ("longitudeDelta", longitude_delta),
        ] {
            if !delta.is_finite() || delta <= 0.0 {
                return Err(CommonError::InvalidRegion(format!(
                    "{name} must be positive, got {delta}"
                )));
            }
        }
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CommonError::InvalidRegion(format!(
                "centre must be finite, got ({latitude}, {longitude})"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
            latitude_delta,
            longitude_delta,
        })
    }

    /// Same span, new centre.
    pub fn centered_on(&self, location: Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            ..*self
        }
    }

    pub fn center(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }

    /// Shift the centre by a fraction of the current span on each axis.
    pub fn panned(&self, lat_steps: f64, lon_steps: f64) -> Self {
        let latitude = (self.latitude + lat_steps * self.latitude_delta).clamp(-90.0, 90.0);
        let mut longitude = self.longitude + lon_steps * self.longitude_delta;
        if longitude > 180.0 {
            longitude -= 360.0;
        } else if longitude < -180.0 {
            longitude += 360.0;
        }
        Self {
            latitude,
            longitude,
            ..*self
        }
    }

    /// Scale both spans. A factor below 1 zooms in.
    pub fn zoomed(&self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return *self;
        }
        Self {
            latitude_delta: (self.latitude_delta * factor).clamp(1e-4, 180.0),
            longitude_delta: (self.longitude_delta * factor).clamp(1e-4, 360.0),
            ..*self
        }
    }

    /// `(min, max)` longitude shown.
    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.longitude_delta / 2.0;
        [self.longitude - half, self.longitude + half]
    }

    /// `(min, max)` latitude shown.
    pub fn y_bounds(&self) -> [f64; 2] {
        let half = self.latitude_delta / 2.0;
        [self.latitude - half, self.latitude + half]
    }

    pub fn contains(&self, location: &Location) -> bool {
        let [x_min, x_max] = self.x_bounds();
        let [y_min, y_max] = self.y_bounds();
        (x_min..=x_max).contains(&location.longitude) && (y_min..=y_max).contains(&location.latitude)
    }
}
