use crate::config::{CoercionPolicy, ReportConfig, WalkthroughConfig, constants};
use crate::error::{PipelineError, ReportResult, ReportWarning, WalkthroughResult};
use crate::pipeline::nodes::{
    AverageCalculatorNode, BackupArchiveNode, CsvWriterNode, FileInspectorNode, FileRemovalNode,
    FolderSetupNode, RecordLoaderNode, RecordsFile, RecordsFileNode, SummarySorterNode,
};
use crate::pipeline::{PipeMap, Pipeline};
use crate::util::prompt::{BoxedPrompt, Prompt};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a JSON list of student scores into a CSV table sorted by average
    Report {
        /// Input JSON file
        #[clap(short = 'i', long, default_value = constants::INPUT_JSON)]
        input: PathBuf,
        /// Output CSV file
        #[clap(short = 'o', long, default_value = constants::OUTPUT_CSV)]
        output: PathBuf,
        /// Handling of scores that are not numbers
        #[clap(long, value_enum, default_value_t = CoercionPolicy::Zero)]
        on_invalid: CoercionPolicy,
        /// Exit with a failure status when the report cannot be produced
        #[clap(long)]
        strict: bool,
    },

    /// Guided tour: create a folder, write names, back up, archive and delete files
    Walkthrough {
        /// Folder to work in
        #[clap(short = 'd', long = "dir", default_value = constants::BASE_FOLDER)]
        folder: PathBuf,
        /// Number of student names to collect
        #[clap(short = 'n', long = "count", default_value_t = constants::NAME_COUNT)]
        name_count: usize,
    },
}

/// Student records toolkit: a guided file walkthrough and a score report converter
#[derive(Parser)]
#[command(name = "studentkit", version, about, long_about = None)]
pub struct Cli {
    /// Also write a debug trace to this file
    #[clap(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

/// What a finished report run produced
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub output: PathBuf,
    pub rows_written: usize,
    pub warnings: Vec<ReportWarning>,
}

/// What a finished walkthrough produced
#[derive(Debug, Clone)]
pub struct WalkthroughOutcome {
    pub folder: PathBuf,
    pub records_file: RecordsFile,
    pub archive_dir: Option<PathBuf>,
    pub removed_file: Option<String>,
}

pub fn report_pipeline() -> Result<Pipeline, PipelineError> {
    Pipeline::new("ReportPipeline")
        .with_external_inputs(vec![
            "input".to_string(),
            "output".to_string(),
            "on_invalid".to_string(),
        ])
        .add_node(Box::new(RecordLoaderNode))?
        .add_node(Box::new(AverageCalculatorNode))?
        .add_node(Box::new(SummarySorterNode))?
        .add_node(Box::new(CsvWriterNode))
}

/// Load, aggregate, sort and write the report
pub fn report_command(config: &ReportConfig) -> ReportResult<ReportOutcome> {
    debug!("Starting report command");
    debug!("Input: {:?}", config.input);
    debug!("Output: {:?}", config.output);
    debug!("Invalid scores: {:?}", config.on_invalid);

    let pipeline = report_pipeline()?;

    let mut data = PipeMap::new();
    data.insert("input", config.input.clone());
    data.insert("output", config.output.clone());
    data.insert("on_invalid", config.on_invalid);

    let mut result = pipeline.execute(data)?;

    Ok(ReportOutcome {
        output: config.output.clone(),
        rows_written: result.take::<usize>("rows_written").unwrap_or_default(),
        warnings: result
            .take::<Vec<ReportWarning>>("warnings")
            .unwrap_or_default(),
    })
}

pub fn walkthrough_pipeline() -> Result<Pipeline, PipelineError> {
    Pipeline::new("WalkthroughPipeline")
        .with_external_inputs(vec![
            "folder".to_string(),
            "folder_label".to_string(),
            "name_count".to_string(),
            "prompt".to_string(),
        ])
        .add_node(Box::new(FolderSetupNode))?
        .add_node(Box::new(RecordsFileNode))?
        .add_node(Box::new(FileInspectorNode))?
        .add_node(Box::new(BackupArchiveNode))?
        .add_node(Box::new(FileRemovalNode))
}

/// Run the walkthrough, reading answers from `prompt`
pub fn walkthrough_command<P: Prompt + 'static>(
    config: &WalkthroughConfig,
    prompt: P,
) -> WalkthroughResult<WalkthroughOutcome> {
    debug!("Starting walkthrough command");
    debug!("Folder: {:?}", config.folder);
    debug!("Names: {}", config.name_count);

    info!("=== Student File Management Walkthrough ===");

    let pipeline = walkthrough_pipeline()?;

    let mut data = PipeMap::new();
    data.insert("folder", config.folder.clone());
    data.insert("folder_label", config.folder_label());
    data.insert("name_count", config.name_count);
    data.insert::<BoxedPrompt>("prompt", Box::new(prompt));

    let mut result = pipeline.execute(data)?;

    let outcome = WalkthroughOutcome {
        folder: result
            .take::<PathBuf>("folder_path")
            .unwrap_or_else(|| config.folder.clone()),
        records_file: result
            .take::<RecordsFile>("records_file")
            .ok_or_else(|| {
                PipelineError::config_error("Walkthrough finished without a records file")
            })?,
        archive_dir: result.take::<Option<PathBuf>>("archive_dir").flatten(),
        removed_file: result.take::<Option<String>>("removed_file").flatten(),
    };

    info!(
        "Program finished. Check {} inside {} for a run log.",
        constants::LOG_FILE,
        config.folder_label()
    );
    info!("Goodbye!");
    Ok(outcome)
}
