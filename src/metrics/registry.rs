//! Per-metric matchers.
//!
//! Every metric is one row of [`METRIC_TABLE`]; the four matching rules are
//! derived from that row's token and compiled once per process.

use crate::data::tag::TAG_MARKER;
use crate::data::utils::to_float_num;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Which "average result" measurement is being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    #[default]
    Ping,
    #[serde(rename = "uplink", alias = "ul")]
    UplinkThroughput,
    #[serde(rename = "downlink", alias = "dl")]
    DownlinkThroughput,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::Ping,
        MetricKind::UplinkThroughput,
        MetricKind::DownlinkThroughput,
    ];

    /// The compiled matcher set for this kind.
    pub fn spec(self) -> &'static MetricSpec {
        &REGISTRY[self.index()]
    }

    pub fn label(self) -> &'static str {
        METRIC_TABLE[self.index()].label
    }

    pub fn token(self) -> &'static str {
        METRIC_TABLE[self.index()].token
    }

    /// Resolve a human label (`Uplink TP`) or a key (`ul`) back to a kind.
    pub fn from_name(name: &str) -> Option<MetricKind> {
        let name = name.trim();
        METRIC_TABLE.iter().find_map(|entry| {
            let hit = entry.label.eq_ignore_ascii_case(name)
                || entry.token.eq_ignore_ascii_case(name)
                || entry.keys.iter().any(|k| k.eq_ignore_ascii_case(name));
            hit.then_some(entry.kind)
        })
    }

    fn index(self) -> usize {
        match self {
            MetricKind::Ping => 0,
            MetricKind::UplinkThroughput => 1,
            MetricKind::DownlinkThroughput => 2,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the metric table.
#[derive(Debug, Clone, Copy)]
pub struct MetricEntry {
    pub kind: MetricKind,
    pub label: &'static str,
    pub token: &'static str,
    pub keys: &'static [&'static str],
}

/// Ordered to match `MetricKind::index`.
pub const METRIC_TABLE: [MetricEntry; 3] = [
    MetricEntry {
        kind: MetricKind::Ping,
        label: "Ping",
        token: "Ping-AvgResult",
        keys: &["ping"],
    },
    MetricEntry {
        kind: MetricKind::UplinkThroughput,
        label: "Uplink TP",
        token: "Up-AvgResult",
        keys: &["uplink", "ul"],
    },
    MetricEntry {
        kind: MetricKind::DownlinkThroughput,
        label: "Downlink TP",
        token: "Down-AvgResult",
        keys: &["downlink", "dl"],
    },
];

/// Structured-log marker that machine-generated result lines carry after the tag.
pub const STRUCTURED_MARKER: &str = "TestData";

const VALUE: &str = r"(?P<val>[0-9,]+(?:\.[0-9]+)?)";

static REGISTRY: LazyLock<[MetricSpec; 3]> =
    LazyLock::new(|| METRIC_TABLE.map(|entry| MetricSpec::new(entry.kind, entry.label, entry.token)));

/// Token plus the two strictness levels of matching.
///
/// File sources are raw device logs and get the strict rules (structured
/// marker required, value only after `=`). Pasted text may have been
/// hand-edited so its rules accept any line naming the token and a value after
/// `=` or bare whitespace.
#[derive(Debug)]
pub struct MetricSpec {
    pub kind: MetricKind,
    pub label: &'static str,
    pub token: &'static str,
    file_filter: Regex,
    file_value: Regex,
    paste_filter: Regex,
    paste_value: Regex,
}

impl MetricSpec {
    fn new(kind: MetricKind, label: &'static str, token: &'static str) -> Self {
        let tok = regex::escape(token);
        let tag = regex::escape(TAG_MARKER);
        let compile = |pattern: String| Regex::new(&pattern).expect("metric pattern");

        Self {
            kind,
            label,
            token,
            file_filter: compile(format!(
                r"(?i){tag}\s*:\s*{STRUCTURED_MARKER}\b.*\b{tok}\b"
            )),
            file_value: compile(format!(r"(?i)\b{tok}\b\s*=\s*{VALUE}")),
            paste_filter: compile(format!(r"(?i)\b{tok}\b")),
            paste_value: compile(format!(r"(?i)\b{tok}\b.*?(?:=|\s){VALUE}\b")),
        }
    }

    pub fn matches_file(&self, payload: &str) -> bool {
        self.file_filter.is_match(payload)
    }

    /// Value following `token =` in a file payload.
    pub fn file_value(&self, payload: &str) -> Option<f64> {
        Self::capture_value(&self.file_value, payload)
    }

    pub fn matches_paste(&self, line: &str) -> bool {
        self.paste_filter.is_match(line)
    }

    /// Value following the token and `=` or whitespace in a pasted line.
    pub fn paste_value(&self, line: &str) -> Option<f64> {
        Self::capture_value(&self.paste_value, line)
    }

    fn capture_value(re: &Regex, text: &str) -> Option<f64> {
        let caps = re.captures(text)?;
        to_float_num(caps.name("val")?.as_str())
    }
}
