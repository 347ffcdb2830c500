pub mod request;
pub mod response;

pub use request::SegmentRequest;
pub use response::{HealthResponse, ResetResponse, SessionResponse};
