use regex::Regex;
use std::sync::LazyLock;

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("line break pattern"));

/// Convert a captured numeric token into `f64`.
///
/// Accepts `1234`, `1,234`, `1234.56` and `1,234.56`. Thousands separators are
/// removed before parsing; anything that still fails to parse yields `None`.
pub fn to_float_num(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|&c| c != ',').collect();
    cleaned.parse::<f64>().ok()
}

/// Split source text into lines, 1-based line numbers attached.
///
/// `\r\n`, a lone `\r` and `\n` all end a line. A final line break does not
/// start an extra empty line.
pub fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text);
    (!body.is_empty())
        .then(|| LINE_BREAK_RE.split(body))
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_thousands_separators() {
        assert_eq!(to_float_num("1,234.50"), Some(1234.5));
        assert_eq!(to_float_num("1,234"), Some(1234.0));
        assert_eq!(to_float_num(" 42 "), Some(42.0));
    }

    #[test]
    fn unparseable_is_none() {
        assert_eq!(to_float_num(""), None);
        assert_eq!(to_float_num(","), None);
        assert_eq!(to_float_num(",,,"), None);
    }

    #[test]
    fn crlf_lines_are_trimmed() {
        let lines: Vec<_> = numbered_lines("a\r\nb\nc").collect();
        assert_eq!(lines, vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn lone_carriage_return_ends_a_line() {
        let lines: Vec<_> = numbered_lines("a\rb\r\n\nc\r").collect();
        assert_eq!(lines, vec![(1, "a"), (2, "b"), (3, ""), (4, "c")]);
        assert_eq!(numbered_lines("").count(), 0);
        assert_eq!(numbered_lines("x\n").count(), 1);
    }

    #[test]
    fn mean_of_empty_is_undefined() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[5.0, 10.0]), Some(7.5));
    }
}
