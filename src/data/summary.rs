//! Free-form summary text: parsing pasted blocks and rendering file
//! extractions into the same shape so they can be pasted back later.

use regex::Regex;
use std::fmt::Write as _;
use std::sync::LazyLock;

use crate::data::columnar::{DisplayRecord, MetricSeries};
use crate::data::timestamp;
use crate::data::utils::numbered_lines;
use crate::metrics::registry::MetricKind;

/// Source label used when a pasted block carries no `[File]` header.
pub const DEFAULT_SOURCE: &str = "Pasted";

static FILE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\[File\]\s+(?P<name>.+?)\s*$").expect("file header pattern")
});

static METRIC_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\[Metric\]\s+(?P<name>.+?)\s*$").expect("metric header pattern")
});

/// Result of summarizing one pasted block.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteSummary {
    pub series: MetricSeries,
    /// Value of the last `[Metric]` header seen, if any.
    pub metric_header: Option<String>,
}

/// Parse a pasted block with the permissive paste rules.
///
/// `[File]` and `[Metric]` headers may appear on any line and are consumed;
/// every other non-blank line naming the token joins the display subset.
pub fn summarize_text(text: &str, kind: MetricKind) -> PasteSummary {
    let spec = kind.spec();
    let mut source = DEFAULT_SOURCE.to_string();
    let mut metric_header = None;
    let mut rows = Vec::new();

    for (line_no, raw_line) in numbered_lines(text) {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = FILE_HEADER_RE.captures(line) {
            source = caps["name"].trim().to_string();
            continue;
        }
        if let Some(caps) = METRIC_HEADER_RE.captures(line) {
            metric_header = Some(caps["name"].trim().to_string());
            continue;
        }

        if !spec.matches_paste(line) {
            continue;
        }

        let value = spec.paste_value(line);
        if value.is_none() {
            tracing::debug!(line_no, token = spec.token, "pasted line without a readable value");
        }
        rows.push(DisplayRecord {
            line_no,
            timestamp: timestamp::scan(line),
            raw: line.to_string(),
            display: line.to_string(),
            value,
        });
    }

    if let Some(header) = metric_header.as_deref() {
        if MetricKind::from_name(header) != Some(kind) {
            tracing::warn!(
                header,
                active = spec.label,
                "pasted block names a different metric; parsing with the active one"
            );
        }
    }

    let mut series = MetricSeries::new(source);
    for row in rows {
        series.push(row);
    }
    tracing::info!(
        source = %series.source,
        metric = spec.label,
        samples = series.len(),
        "summarized pasted text"
    );

    PasteSummary {
        series,
        metric_header,
    }
}

/// Render a series as summary text: headers, display lines, count and mean.
///
/// The footer lines never contain a metric token, so every sample read by the
/// file rules comes back through [`summarize_text`] in the same order. A record
/// whose file value was unreadable can still yield a number under the looser
/// paste rule (`Ping-AvgResult=n/a rtt 12` reads back as 12).
pub fn render_summary(series: &MetricSeries, kind: MetricKind) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[File] {}", series.source);
    let _ = writeln!(out, "[Metric] {}", kind.label());
    out.push('\n');
    for record in series.records() {
        let _ = writeln!(out, "{}", record.display);
    }
    let _ = writeln!(out, "\n--- Count (numeric): {} ---", series.len());
    match series.mean() {
        Some(m) => {
            let _ = writeln!(out, "Mean: {m:.6}");
        }
        None => out.push_str("Mean: N/A\n"),
    }
    out
}
