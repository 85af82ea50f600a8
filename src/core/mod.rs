pub mod output;
pub mod parser;
pub mod record;
pub mod summary;

pub use output::CsvOutputHandler;
pub use parser::RecordParser;
pub use record::{StudentRecord, SummaryRow};
