use regex::Regex;
use std::sync::LazyLock;

/// Literal that marks a speed-test diagnostic line.
pub const TAG_MARKER: &str = "SpeedTestSKT";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?P<msg>{}\s*:.*)$", regex::escape(TAG_MARKER))).expect("tag pattern")
});

static REQUEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Ping-[Rr]equest").expect("request pattern"));

static RESPONSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Ping-[Rr]esponse").expect("response pattern"));

/// Payload of a tagged line: from the marker to end of line, verbatim.
pub fn extract_payload(line: &str) -> Option<&str> {
    TAG_RE
        .captures(line)
        .and_then(|caps| caps.name("msg"))
        .map(|m| m.as_str())
}

/// Canonical display form of a payload.
///
/// Only the known ping sub-label casing variants are rewritten; the raw
/// payload used for matching is never touched.
pub fn normalize_display(payload: &str) -> String {
    let msg = REQUEST_RE.replace_all(payload, "Ping-Request");
    RESPONSE_RE.replace_all(&msg, "Ping-Response").into_owned()
}
