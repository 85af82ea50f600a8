use std::io;
use std::path::Path;
use tracing::debug;

use crate::config::constants;
use crate::core::record::SummaryRow;
use crate::error::{ReportError, ReportResult};

pub struct CsvOutputHandler;

impl CsvOutputHandler {
    /// Encode the header and rows as CSV
    pub fn encode(rows: &[SummaryRow]) -> io::Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(constants::REPORT_HEADER)?;
        for row in rows {
            writer.write_record(row.fields())?;
        }

        writer
            .into_inner()
            .map_err(|e| io::Error::new(e.error().kind(), e.to_string()))
    }

    /// Replace `path` with the encoded report, returning the number of rows
    pub fn write(path: &Path, rows: &[SummaryRow]) -> ReportResult<usize> {
        let bytes = Self::encode(rows).map_err(|e| ReportError::output_write(path, e))?;
        std::fs::write(path, &bytes).map_err(|e| ReportError::output_write(path, e))?;
        debug!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(rows.len())
    }
}
