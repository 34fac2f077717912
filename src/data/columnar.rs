use serde::{Deserialize, Serialize};

use crate::data::timestamp::Timestamp;
use crate::data::utils::mean;

/// One accepted line, reconstructed for display.
///
/// `value` is `None` when the line matched structurally but its number could
/// not be read; such records are shown but never averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub line_no: usize,
    pub timestamp: Option<Timestamp>,
    pub raw: String,
    pub display: String,
    pub value: Option<f64>,
}

/// Records and samples pulled from one source, in source line order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub source: String,
    records: Vec<DisplayRecord>,
    samples: Vec<f64>,
}

impl MetricSeries {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            records: Vec::new(),
            samples: Vec::new(),
        }
    }

    /// Append a record; its value, if any, becomes the next sample.
    pub fn push(&mut self, record: DisplayRecord) {
        if let Some(v) = record.value {
            self.samples.push(v);
        }
        self.records.push(record);
    }

    pub fn records(&self) -> &[DisplayRecord] {
        &self.records
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn mean(&self) -> Option<f64> {
        mean(&self.samples)
    }

    /// Number of numeric samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
