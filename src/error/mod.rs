/// Centralized error handling for studentkit
pub mod pipeline;
pub mod report;
pub mod walkthrough;

pub use pipeline::{PipelineError, PipelineResult};
pub use report::{ReportError, ReportResult, ReportWarning};
pub use walkthrough::{WalkthroughError, WalkthroughResult};
