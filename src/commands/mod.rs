pub mod report;

// Re-export command functions for convenience
pub use report::{report, ReportParams};
