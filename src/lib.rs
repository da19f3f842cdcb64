//! Turns assessment setup data and per-student scores into written achievement reports.

pub mod aggregate;
pub mod assessment;
pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod narrative;
pub mod normalize;
pub mod reports;
pub mod sheets;
pub mod student;
pub mod summary;
pub mod telemetry;

pub use error::{ReportError, SheetError};
pub use narrative::UnhandledPolicy;
pub use reports::generate_reports;
