use crate::config::CoercionPolicy;
use crate::core::summary::{sort_by_average, summarize};
use crate::core::{CsvOutputHandler, RecordParser, StudentRecord, SummaryRow};
use crate::error::ReportWarning;
use crate::pipeline::{NodeResult, PipeMap, PipeNode};
use std::path::PathBuf;
use tracing::{debug, info};

/// Record loader node - read the input file into student records
pub struct RecordLoaderNode;

impl PipeNode for RecordLoaderNode {
    fn name(&self) -> String {
        "RecordLoader".to_string()
    }

    fn input(&self) -> Vec<String> {
        vec!["input".to_string()]
    }

    fn output(&self) -> Vec<String> {
        vec!["records".to_string(), "warnings".to_string()]
    }

    fn process(&self, mut data: PipeMap) -> NodeResult<PipeMap> {
        let input = data
            .get::<PathBuf>("input")
            .ok_or("Missing input path")?
            .clone();

        let document = RecordParser::read_file(&input)?;
        let (records, warning) = RecordParser::parse_records(&document);

        debug!("Loaded {} records from {:?}", records.len(), input);
        data.insert("records", records);
        data.insert("warnings", warning.into_iter().collect::<Vec<ReportWarning>>());
        Ok(data)
    }
}

/// Average calculator node - one summary row per record
pub struct AverageCalculatorNode;

impl PipeNode for AverageCalculatorNode {
    fn name(&self) -> String {
        "AverageCalculator".to_string()
    }

    fn input(&self) -> Vec<String> {
        vec!["records".to_string(), "on_invalid?".to_string()]
    }

    fn output(&self) -> Vec<String> {
        vec!["summaries".to_string()]
    }

    fn process(&self, mut data: PipeMap) -> NodeResult<PipeMap> {
        let policy = data
            .get::<CoercionPolicy>("on_invalid")
            .copied()
            .unwrap_or_default();
        let records = data
            .take::<Vec<StudentRecord>>("records")
            .ok_or("Missing records input")?;

        let summaries = summarize(&records, policy);

        debug!("Computed {} averages ({:?} policy)", summaries.len(), policy);
        data.insert("summaries", summaries);
        Ok(data)
    }
}

/// Summary sorter node - order rows by average, highest first
pub struct SummarySorterNode;

impl PipeNode for SummarySorterNode {
    fn name(&self) -> String {
        "SummarySorter".to_string()
    }

    fn input(&self) -> Vec<String> {
        vec!["summaries".to_string()]
    }

    fn output(&self) -> Vec<String> {
        vec!["summaries".to_string()]
    }

    fn process(&self, mut data: PipeMap) -> NodeResult<PipeMap> {
        let summaries = data
            .get_mut::<Vec<SummaryRow>>("summaries")
            .ok_or("Missing summaries input")?;

        sort_by_average(summaries);
        Ok(data)
    }
}

/// CSV writer node - write the sorted summaries to the output file
pub struct CsvWriterNode;

impl PipeNode for CsvWriterNode {
    fn name(&self) -> String {
        "CsvWriter".to_string()
    }

    fn input(&self) -> Vec<String> {
        vec!["summaries".to_string(), "output".to_string()]
    }

    fn output(&self) -> Vec<String> {
        vec!["rows_written".to_string()]
    }

    fn process(&self, mut data: PipeMap) -> NodeResult<PipeMap> {
        let output = data
            .get::<PathBuf>("output")
            .ok_or("Missing output path")?;
        let summaries = data
            .get::<Vec<SummaryRow>>("summaries")
            .ok_or("Missing summaries input")?;

        let rows_written = CsvOutputHandler::write(output, summaries)?;

        info!("Report written to '{}'", output.display());
        data.insert("rows_written", rows_written);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sorter_orders_summaries() {
        let mut data = PipeMap::new();
        data.insert(
            "summaries",
            vec![
                SummaryRow {
                    id: "S1".to_string(),
                    name: "Ann".to_string(),
                    average: 60.0,
                },
                SummaryRow {
                    id: "S2".to_string(),
                    name: "Bo".to_string(),
                    average: 95.5,
                },
            ],
        );

        let data = SummarySorterNode.process(data).unwrap();
        let summaries = data.get::<Vec<SummaryRow>>("summaries").unwrap();
        assert_eq!(summaries[0].id, "S2");
    }

    #[test]
    fn test_calculator_uses_policy() {
        let record = StudentRecord::from_value(&json!({"id": "S1", "scores": [80, "x", 100]}));

        let mut data = PipeMap::new();
        data.insert("records", vec![record.clone()]);
        let zeroed = AverageCalculatorNode.process(data).unwrap();
        assert_eq!(zeroed.get::<Vec<SummaryRow>>("summaries").unwrap()[0].average, 0.0);

        let mut data = PipeMap::new();
        data.insert("records", vec![record]);
        data.insert("on_invalid", CoercionPolicy::Skip);
        let skipped = AverageCalculatorNode.process(data).unwrap();
        assert_eq!(skipped.get::<Vec<SummaryRow>>("summaries").unwrap()[0].average, 90.0);
    }
}
