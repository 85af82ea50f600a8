//! Aggregation and ordering of report rows

use std::cmp::Ordering;

use crate::config::CoercionPolicy;
use crate::core::record::{StudentRecord, SummaryRow};

/// One summary row per record, in input order
pub fn summarize(records: &[StudentRecord], policy: CoercionPolicy) -> Vec<SummaryRow> {
    records
        .iter()
        .map(|record| SummaryRow::from_record(record, policy))
        .collect()
}

/// Highest average first
pub fn compare_averages(a: &SummaryRow, b: &SummaryRow) -> Ordering {
    b.average.total_cmp(&a.average)
}

/// Sort rows by average, descending. Rows with equal averages keep their
/// relative order.
pub fn sort_by_average(rows: &mut [SummaryRow]) {
    rows.sort_by(compare_averages);
}
