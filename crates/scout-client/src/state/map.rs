use scout_common::{Location, MapRegion};

/// Current device location and the visible viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct MapState {
    current_location: Option<Location>,
    map_region: Option<MapRegion>,
    follow_user_location: bool,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            current_location: None,
            map_region: Some(MapRegion::DEFAULT),
            follow_user_location: true,
        }
    }
}

impl MapState {
    pub fn current_location(&self) -> Option<Location> {
        self.current_location
    }

    pub fn map_region(&self) -> Option<MapRegion> {
        self.map_region
    }

    /// Region to draw; the default region when none is set.
    pub fn region_or_default(&self) -> MapRegion {
        self.map_region.unwrap_or_default()
    }

    pub fn follow_user_location(&self) -> bool {
        self.follow_user_location
    }

    /// Record a new fix. While following, the viewport moves to it and keeps
    /// its zoom.
    pub fn set_current_location(&mut self, location: Location) {
        self.current_location = Some(location);
        if self.follow_user_location {
            self.map_region = Some(self.region_or_default().centered_on(location));
        }
    }

    /// Manual pan or zoom. Turns follow off until it is re-enabled.
    pub fn set_map_region(&mut self, region: MapRegion) {
        self.map_region = Some(region);
        self.follow_user_location = false;
    }

    pub fn set_follow_user_location(&mut self, follow: bool) {
        self.follow_user_location = follow;
    }

    /// Turn follow back on and jump to the last known fix, if any.
    pub fn recenter(&mut self) {
        self.follow_user_location = true;
        if let Some(location) = self.current_location {
            self.set_current_location(location);
        }
    }

    /// Where a new report should be placed: the fix, else the viewport centre.
    pub fn report_position(&self) -> Location {
        self.current_location
            .unwrap_or_else(|| self.region_or_default().center())
    }
}
