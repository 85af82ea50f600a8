pub mod report;
pub mod walkthrough;

pub use report::{AverageCalculatorNode, CsvWriterNode, RecordLoaderNode, SummarySorterNode};
pub use walkthrough::{
    BackupArchiveNode, FileInspectorNode, FileRemovalNode, FolderSetupNode, RecordsFile,
    RecordsFileNode,
};
