use std::fs;
use std::path::Path;

use crate::data::columnar::{DisplayRecord, MetricSeries};
use crate::data::tag::{extract_payload, normalize_display};
use crate::data::timestamp;
use crate::data::utils::numbered_lines;
use crate::error::CompareError;
use crate::metrics::registry::MetricKind;

/// Read a log file as text, replacing invalid byte sequences.
pub fn read_lossy(path: &Path) -> Result<String, CompareError> {
    let bytes = fs::read(path).map_err(|source| CompareError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Name shown for a file source: the file name, or the whole path if it has none.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run the strict file rules over raw log text.
///
/// A line survives only if it has a timestamp, a tag and the metric's
/// structured marker. Everything else is skipped silently.
pub fn extract_from_text(text: &str, source: &str, kind: MetricKind) -> MetricSeries {
    let spec = kind.spec();
    let mut series = MetricSeries::new(source);
    let mut malformed = 0usize;

    for (line_no, line) in numbered_lines(text) {
        let Some(ts) = timestamp::scan(line) else {
            continue;
        };
        let Some(payload) = extract_payload(line) else {
            continue;
        };
        if !spec.matches_file(payload) {
            continue;
        }

        let value = spec.file_value(payload);
        if value.is_none() {
            malformed += 1;
            tracing::debug!(line_no, token = spec.token, "matched line without a readable value");
        }

        let display = format!("{} {}", ts, normalize_display(payload));
        series.push(DisplayRecord {
            line_no,
            timestamp: Some(ts),
            raw: payload.to_string(),
            display,
            value,
        });
    }

    tracing::info!(
        source,
        metric = spec.label,
        records = series.records().len(),
        samples = series.len(),
        malformed,
        "extracted file series"
    );
    series
}

/// Load a log file and extract `kind` from it.
pub fn extract_from_file(path: &Path, kind: MetricKind) -> Result<MetricSeries, CompareError> {
    let text = read_lossy(path)?;
    Ok(extract_from_text(&text, &source_name(path), kind))
}
