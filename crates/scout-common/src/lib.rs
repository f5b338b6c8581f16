pub mod api;
pub mod error;
pub mod models;

pub use error::{CommonError, CommonResult};
pub use models::{Location, MapRegion, Report, ReportPatch, TokenPair, User, UserProfile};
