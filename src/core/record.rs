use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::CoercionPolicy;

/// One student entry as read from the input file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Opaque identifier, empty when absent
    pub id: String,
    /// Display name, empty when absent
    pub name: String,
    /// Raw score values, in input order
    pub scores: Vec<Value>,
}

impl StudentRecord {
    /// Build a record from one element of the input array.
    ///
    /// Missing or `null` text fields become empty strings, other non-string
    /// values keep their JSON text. A `scores` value that is not an array is
    /// treated as no scores. Elements that are not objects give an empty record.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            debug!("Record is not an object: {}", value);
            return Self::default();
        };

        let scores = match object.get("scores") {
            Some(Value::Array(items)) => items.clone(),
            Some(other) => {
                debug!("Ignoring non-array scores: {}", other);
                Vec::new()
            }
            None => Vec::new(),
        };

        Self {
            id: text_field(object, "id"),
            name: text_field(object, "name"),
            scores,
        }
    }

    /// Mean of the scores under `policy`, rounded to 2 decimals
    pub fn average(&self, policy: CoercionPolicy) -> f64 {
        let values: Vec<f64> = match policy {
            CoercionPolicy::Zero => {
                match self.scores.iter().map(coerce_score).collect::<Option<Vec<_>>>() {
                    Some(values) => values,
                    None => {
                        debug!("Record '{}' has a non-numeric score, average is 0.0", self.id);
                        return 0.0;
                    }
                }
            }
            CoercionPolicy::Skip => self.scores.iter().filter_map(coerce_score).collect(),
        };

        if values.is_empty() {
            return 0.0;
        }

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        if !mean.is_finite() {
            debug!("Record '{}' average overflowed, using 0.0", self.id);
            return 0.0;
        }
        round2(mean)
    }
}

/// One line of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub id: String,
    pub name: String,
    pub average: f64,
}

impl SummaryRow {
    pub fn from_record(record: &StudentRecord, policy: CoercionPolicy) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            average: record.average(policy),
        }
    }

    /// Fields in report column order
    pub fn fields(&self) -> [String; 3] {
        [
            self.id.clone(),
            self.name.clone(),
            format_average(self.average),
        ]
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read one raw score as a finite number.
///
/// Numbers are taken directly, booleans count as 1.0 and 0.0, strings are
/// parsed after trimming. Everything else, and anything that is not finite,
/// is rejected.
pub fn coerce_score(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Round to 2 decimals from the exact binary value, ties to even.
///
/// Never yields negative zero.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded: f64 = format!("{value:.2}").parse().unwrap_or(value);
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Shortest decimal form, always with a fractional part (`75.0`, `83.33`)
pub fn format_average(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
