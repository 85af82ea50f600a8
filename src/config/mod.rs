//! Runtime configuration for both commands
pub mod constants;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What to do with a score that cannot be read as a number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// One bad score sets the whole record's average to 0.0
    #[default]
    Zero,
    /// Bad scores are left out of the mean
    Skip,
}

/// Settings of the report command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub on_invalid: CoercionPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(constants::INPUT_JSON),
            output: PathBuf::from(constants::OUTPUT_CSV),
            on_invalid: CoercionPolicy::default(),
        }
    }
}

impl ReportConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            on_invalid: CoercionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, on_invalid: CoercionPolicy) -> Self {
        self.on_invalid = on_invalid;
        self
    }
}

/// Settings of the walkthrough command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkthroughConfig {
    pub folder: PathBuf,
    pub name_count: usize,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from(constants::BASE_FOLDER),
            name_count: constants::NAME_COUNT,
        }
    }
}

impl WalkthroughConfig {
    pub fn new(folder: impl Into<PathBuf>, name_count: usize) -> Self {
        Self {
            folder: folder.into(),
            name_count,
        }
    }

    /// Display name of the managed folder, used in prompts
    pub fn folder_label(&self) -> String {
        self.folder
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.folder.display().to_string())
    }
}
