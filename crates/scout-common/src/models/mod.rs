mod geo;
mod report;
mod user;

pub use geo::{Location, MapRegion, DEFAULT_DELTA};
pub use report::{Report, ReportPatch};
pub use user::{TokenPair, User, UserProfile};
