use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use crate::core::record::StudentRecord;
use crate::error::{ReportError, ReportResult, ReportWarning};

/// Student records parser
pub struct RecordParser;

impl RecordParser {
    /// Read and parse the input file. Nothing is recovered here: a missing,
    /// unreadable or unparsable file aborts the report.
    pub fn read_file(path: &Path) -> ReportResult<Value> {
        debug!("Reading records from {:?}", path);
        let content =
            std::fs::read_to_string(path).map_err(|e| ReportError::from_read(path, e))?;
        Self::parse_str(path, &content)
    }

    pub fn parse_str(path: &Path, content: &str) -> ReportResult<Value> {
        serde_json::from_str(content).map_err(|source| ReportError::InputParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Turn the parsed document into records. A top-level value that is not
    /// an array yields no records and a warning.
    pub fn parse_records(document: &Value) -> (Vec<StudentRecord>, Option<ReportWarning>) {
        match document {
            Value::Array(items) => {
                let records: Vec<StudentRecord> =
                    items.iter().map(StudentRecord::from_value).collect();
                debug!("Parsed {} records", records.len());
                (records, None)
            }
            other => {
                let warning = ReportWarning::UnexpectedShape {
                    found: json_kind(other),
                };
                warn!("{}", warning);
                (Vec::new(), Some(warning))
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
