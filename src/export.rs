//! Explicit exports. Nothing here runs unless the caller asks for it.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::data::columnar::MetricSeries;
use crate::error::CompareError;
use crate::metrics::registry::MetricKind;
use crate::session::Comparison;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    date: &'a str,
    time: &'a str,
    metric: &'a str,
    index: Option<usize>,
    value: Option<f64>,
    line: usize,
    raw: &'a str,
    display: &'a str,
}

/// Write one row per display record, in source order.
///
/// `index` counts numeric samples from 1 and is blank for records whose value
/// could not be read.
pub fn write_csv<W: Write>(series: &MetricSeries, kind: MetricKind, writer: W) -> Result<(), CompareError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut index = 0usize;

    for record in series.records() {
        let row_index = record.value.map(|_| {
            index += 1;
            index
        });
        let (date, time) = record
            .timestamp
            .as_ref()
            .map(|ts| (ts.date.as_str(), ts.time.as_str()))
            .unwrap_or(("", ""));
        wtr.serialize(ExportRow {
            date,
            time,
            metric: kind.label(),
            index: row_index,
            value: record.value,
            line: record.line_no,
            raw: &record.raw,
            display: &record.display,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(series: &MetricSeries, kind: MetricKind, path: &Path) -> Result<(), CompareError> {
    let file = File::create(path)?;
    write_csv(series, kind, file)?;
    tracing::info!(path = %path.display(), rows = series.records().len(), "wrote csv export");
    Ok(())
}

pub fn to_json(cmp: &Comparison) -> Result<String, CompareError> {
    Ok(serde_json::to_string_pretty(cmp)?)
}
