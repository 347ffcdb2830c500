//! Domain models for the segmentation workflow

pub mod bbox;
pub mod run;
pub mod session;

pub use bbox::BoundingBox;
pub use run::{AutomaticParams, RunConfig, RunMode};
pub use session::{RunRecord, SessionState};
