pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod util;

pub use cli::{ReportOutcome, WalkthroughOutcome, report_command, walkthrough_command};
pub use config::{CoercionPolicy, ReportConfig, WalkthroughConfig};
