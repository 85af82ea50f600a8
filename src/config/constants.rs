//! Constants for studentkit

/// Default JSON input of the report command
pub const INPUT_JSON: &str = "students.json";

/// Default CSV output of the report command
pub const OUTPUT_CSV: &str = "report.csv";

/// Column names of the report, in output order
pub const REPORT_HEADER: [&str; 3] = ["id", "name", "average"];

/// Default folder managed by the walkthrough
pub const BASE_FOLDER: &str = "StudentFiles";

/// Activity log kept inside the walkthrough folder
pub const LOG_FILE: &str = "activity_log.txt";

/// Archive sub-folder for backups
pub const ARCHIVE_DIR: &str = "Archive";

/// Prefix of backup copies
pub const BACKUP_PREFIX: &str = "backup_";

/// Number of student names collected by the walkthrough
pub const NAME_COUNT: usize = 5;

/// Timestamp layout used in the activity log and file reports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Name of the records file written on `date`
pub fn records_file_name(date: chrono::NaiveDate) -> String {
    format!("records_{}.txt", date.format("%Y-%m-%d"))
}
