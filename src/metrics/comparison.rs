use serde::Serialize;

use crate::data::utils::mean;
use crate::error::MissingSides;

/// Outcome of comparing two sample sequences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Classification {
    /// Both means defined and A's mean is non-zero.
    Ready,
    /// Both means defined but A's mean is zero, so there is no delta.
    BaselineZero,
    /// One or both sides have no samples.
    Missing { sides: MissingSides },
}

/// Means of A and B and the percentage change of B relative to A.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub mean_a: Option<f64>,
    pub mean_b: Option<f64>,
    pub delta_percent: Option<f64>,
    pub count_a: usize,
    pub count_b: usize,
    pub classification: Classification,
}

impl ComparisonResult {
    pub fn is_ready(&self) -> bool {
        matches!(self.classification, Classification::Ready)
    }

    /// Human-readable delta: `+20.00%` or the reason it is not applicable.
    pub fn delta_label(&self) -> String {
        match (self.classification, self.delta_percent) {
            (Classification::Ready, Some(d)) => format!("{d:+.2}%"),
            (Classification::BaselineZero, _) => "N/A (A mean is 0)".to_string(),
            _ => "N/A (need numeric values in both A and B)".to_string(),
        }
    }
}

/// `(b - a) / a * 100`, undefined when `a` is zero.
pub fn delta_percent(mean_a: f64, mean_b: f64) -> Option<f64> {
    if mean_a == 0.0 {
        return None;
    }
    Some((mean_b - mean_a) / mean_a * 100.0)
}

/// Compare two sample sequences of the same metric.
///
/// Total: every input yields a classification plus whichever of the means and
/// the delta are defined.
pub fn compare(a: &[f64], b: &[f64]) -> ComparisonResult {
    let mean_a = mean(a);
    let mean_b = mean(b);

    let (classification, delta) = match (mean_a, mean_b) {
        (Some(ma), Some(mb)) => match delta_percent(ma, mb) {
            Some(d) => (Classification::Ready, Some(d)),
            None => (Classification::BaselineZero, None),
        },
        (None, Some(_)) => (Classification::Missing { sides: MissingSides::A }, None),
        (Some(_), None) => (Classification::Missing { sides: MissingSides::B }, None),
        (None, None) => (Classification::Missing { sides: MissingSides::Both }, None),
    };

    ComparisonResult {
        mean_a,
        mean_b,
        delta_percent: delta,
        count_a: a.len(),
        count_b: b.len(),
        classification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_reports_signed_delta() {
        let r = compare(&[100.0], &[120.0]);
        assert_eq!(r.classification, Classification::Ready);
        assert_eq!(r.delta_label(), "+20.00%");

        let r = compare(&[90.0, 110.0], &[50.0]);
        assert_eq!(r.mean_a, Some(100.0));
        assert_eq!(r.delta_label(), "-50.00%");
    }

    #[test]
    fn zero_baseline_keeps_means() {
        let r = compare(&[0.0], &[50.0]);
        assert_eq!(r.classification, Classification::BaselineZero);
        assert_eq!(r.mean_a, Some(0.0));
        assert_eq!(r.mean_b, Some(50.0));
        assert_eq!(r.delta_percent, None);
        assert_eq!(r.delta_label(), "N/A (A mean is 0)");
    }

    #[test]
    fn missing_sides_are_named() {
        let r = compare(&[], &[1.0]);
        assert_eq!(r.classification, Classification::Missing { sides: MissingSides::A });
        assert_eq!(r.mean_a, None);
        assert_eq!(r.mean_b, Some(1.0));

        let r = compare(&[1.0], &[]);
        assert_eq!(r.classification, Classification::Missing { sides: MissingSides::B });

        let r = compare(&[], &[]);
        assert_eq!(r.classification, Classification::Missing { sides: MissingSides::Both });
        assert_eq!(r.delta_percent, None);
    }

    #[test]
    fn zero_b_is_a_full_drop() {
        let r = compare(&[10.0], &[0.0]);
        assert!(r.is_ready());
        assert_eq!(r.delta_percent, Some(-100.0));
    }

    #[test]
    fn serializes_status_tag() {
        let json = serde_json::to_value(compare(&[0.0], &[1.0])).unwrap();
        assert_eq!(json["classification"]["status"], "baseline-zero");
        let json = serde_json::to_value(compare(&[], &[1.0])).unwrap();
        assert_eq!(json["classification"]["sides"], "a");
    }
}
