use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use scout_common::Location;

/// Source of device position fixes, polled on every UI tick.
pub trait LocationProvider: Send {
    /// A new fix since the last poll, if there is one.
    fn poll(&mut self) -> Option<Location>;
}

/// A single fix given on the command line.
pub struct FixedLocation {
    pending: Option<Location>,
}

impl FixedLocation {
    pub fn new(location: Location) -> Self {
        Self {
            pending: Some(location),
        }
    }
}

impl LocationProvider for FixedLocation {
    fn poll(&mut self) -> Option<Location> {
        self.pending.take()
    }
}

/// Follows a file whose last `lat,lon` line is the current fix, e.g. one
/// appended to by `gpspipe` through a small script. The file is only
/// re-read when its modification time changes.
pub struct LocationFile {
    path: PathBuf,
    last_modified: Option<SystemTime>,
    last_fix: Option<Location>,
}

impl LocationFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_modified: None,
            last_fix: None,
        }
    }

    fn read_last_fix(&self) -> Option<Location> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "location file unreadable");
                return None;
            }
        };
        content
            .lines()
            .rev()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .find_map(Location::parse)
    }
}

impl LocationProvider for LocationFile {
    fn poll(&mut self) -> Option<Location> {
        let modified = fs::metadata(&self.path).and_then(|m| m.modified()).ok()?;
        if self.last_modified == Some(modified) {
            return None;
        }
        self.last_modified = Some(modified);

        let fix = self.read_last_fix()?;
        if self.last_fix == Some(fix) {
            return None;
        }
        self.last_fix = Some(fix);
        Some(fix)
    }
}

/// Never produces a fix.
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn poll(&mut self) -> Option<Location> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn fixed_location_reports_once() {
        let mut provider = FixedLocation::new(Location::new(-37.8, 144.9));
        assert_eq!(provider.poll(), Some(Location::new(-37.8, 144.9)));
        assert_eq!(provider.poll(), None);
    }

    #[test]
    fn location_file_reads_last_valid_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "-37.80,144.90").unwrap();
        writeln!(file, "-37.81,144.96").unwrap();
        writeln!(file, "garbage").unwrap();
        writeln!(file, "# comment").unwrap();
        file.flush().unwrap();

        let mut provider = LocationFile::new(file.path().to_path_buf());
        assert_eq!(provider.poll(), Some(Location::new(-37.81, 144.96)));
        // Unchanged file yields nothing new.
        assert_eq!(provider.poll(), None);
    }

    #[test]
    fn missing_location_file_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let mut provider = LocationFile::new(dir.path().join("nope"));
        assert_eq!(provider.poll(), None);
    }
}
