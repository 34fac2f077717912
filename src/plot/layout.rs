//! Chart geometry, independent of any drawing backend.

use itertools::{Itertools, MinMaxResult};
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::metrics::comparison::ComparisonResult;

pub const MAGNITUDE_PLACEHOLDER: &str = "Load/Paste both A and B, then Compare Now";
pub const SERIES_PLACEHOLDER: &str = "No numeric values found for selected metric in A/B";

const TICKS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub name: String,
    pub value: f64,
    /// Height relative to the chart scale, `0.0..=1.0` for non-negative means.
    pub fraction: f64,
    pub label: String,
}

/// Two bars, A then B, scaled to the larger mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeChart {
    pub title: String,
    pub scale: f64,
    pub bars: Vec<Bar>,
    pub delta: Option<String>,
    pub placeholder: Option<&'static str>,
}

impl MagnitudeChart {
    pub fn build(result: &ComparisonResult, names: (&str, &str), title: &str) -> Self {
        let (Some(a), Some(b)) = (result.mean_a, result.mean_b) else {
            return Self {
                title: title.to_string(),
                scale: 1.0,
                bars: Vec::new(),
                delta: None,
                placeholder: Some(MAGNITUDE_PLACEHOLDER),
            };
        };

        let scale = magnitude_scale(a, b);
        let bar = |side: &str, name: &str, value: f64| Bar {
            name: format!("{side}: {name}"),
            value,
            fraction: value / scale,
            label: format!("{value:.4}"),
        };

        Self {
            title: title.to_string(),
            scale,
            bars: vec![bar("A", names.0, a), bar("B", names.1, b)],
            delta: result
                .delta_percent
                .map(|d| format!("Delta: {d:+.2}% (B vs A)")),
            placeholder: None,
        }
    }
}

/// Larger of the two means, or 1.0 when that is not positive.
pub fn magnitude_scale(a: f64, b: f64) -> f64 {
    let max = a.max(b);
    if max <= 0.0 {
        1.0
    } else {
        max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// A and B samples plotted against their index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesChart {
    pub title: String,
    pub names: (String, String),
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    /// Number of index slots on the x axis, at least 2.
    pub x_len: usize,
    pub y_range: (f64, f64),
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub placeholder: Option<&'static str>,
}

impl SeriesChart {
    pub fn build(a: &[f64], b: &[f64], names: (&str, &str), title: &str) -> Self {
        let x_len = a.len().max(b.len()).max(2);
        let y_range = value_range(a, b);
        let placeholder = (a.is_empty() && b.is_empty()).then_some(SERIES_PLACEHOLDER);

        Self {
            title: title.to_string(),
            names: (names.0.to_string(), names.1.to_string()),
            a: a.to_vec(),
            b: b.to_vec(),
            x_len,
            y_range,
            x_ticks: x_ticks(x_len),
            y_ticks: y_ticks(y_range),
            placeholder,
        }
    }

    /// Fraction of the x axis for sample `i`.
    pub fn x_fraction(&self, i: usize) -> f64 {
        i as f64 / (self.x_len - 1) as f64
    }

    /// Fraction of the y axis for `v`, 0 at the bottom.
    pub fn y_fraction(&self, v: f64) -> f64 {
        let (lo, hi) = self.y_range;
        (v - lo) / (hi - lo)
    }
}

/// Combined min/max of both sequences, widened to `[min, min + 1]` when flat.
///
/// Two empty sequences give `(0.0, 1.0)`.
pub fn value_range(a: &[f64], b: &[f64]) -> (f64, f64) {
    let (lo, hi) = match a.iter().chain(b).copied().map(OrderedFloat).minmax() {
        MinMaxResult::NoElements => return (0.0, 1.0),
        MinMaxResult::OneElement(v) => (v.0, v.0),
        MinMaxResult::MinMax(lo, hi) => (lo.0, hi.0),
    };
    if hi == lo {
        (lo, lo + 1.0)
    } else {
        (lo, hi)
    }
}

fn x_ticks(x_len: usize) -> Vec<Tick> {
    let span = (x_len - 1) as f64;
    (0..TICKS)
        .map(|k| {
            let i = (k as f64 * span / (TICKS - 1) as f64).round() as usize;
            Tick {
                position: i as f64 / span,
                label: (i + 1).to_string(),
            }
        })
        .collect()
}

fn y_ticks((lo, hi): (f64, f64)) -> Vec<Tick> {
    (0..TICKS)
        .map(|k| {
            let frac = k as f64 / (TICKS - 1) as f64;
            let value = hi - frac * (hi - lo);
            Tick {
                position: 1.0 - frac,
                label: format!("{value:.2}"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::comparison::compare;

    #[test]
    fn bars_scale_to_larger_mean() {
        let chart = MagnitudeChart::build(&compare(&[50.0], &[100.0]), ("a.txt", "b.txt"), "t");
        assert_eq!(chart.scale, 100.0);
        assert_eq!(chart.bars[0].fraction, 0.5);
        assert_eq!(chart.bars[1].label, "100.0000");
        assert_eq!(chart.bars[0].name, "A: a.txt");
        assert_eq!(chart.delta.as_deref(), Some("Delta: +100.00% (B vs A)"));
    }

    #[test]
    fn non_positive_means_fall_back_to_unit_scale() {
        assert_eq!(magnitude_scale(0.0, 0.0), 1.0);
        assert_eq!(magnitude_scale(-3.0, -1.0), 1.0);
        let chart = MagnitudeChart::build(&compare(&[0.0], &[0.0]), ("a", "b"), "t");
        assert_eq!(chart.scale, 1.0);
        assert_eq!(chart.delta, None);
    }

    #[test]
    fn missing_mean_shows_placeholder() {
        let chart = MagnitudeChart::build(&compare(&[], &[1.0]), ("a", "b"), "t");
        assert!(chart.bars.is_empty());
        assert_eq!(chart.placeholder, Some(MAGNITUDE_PLACEHOLDER));
    }

    #[test]
    fn series_axis_follows_longer_sequence() {
        let chart = SeriesChart::build(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0], ("a", "b"), "t");
        assert_eq!(chart.x_len, 5);
        assert_eq!(chart.b.len(), 1);
        assert_eq!(chart.y_range, (1.0, 5.0));
        let labels: Vec<_> = chart.x_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(chart.y_ticks[0].label, "5.00");
        assert_eq!(chart.y_ticks[4].label, "1.00");
        assert_eq!(chart.x_fraction(4), 1.0);
        assert_eq!(chart.y_fraction(3.0), 0.5);
    }

    #[test]
    fn flat_series_gets_unit_span() {
        assert_eq!(value_range(&[7.0, 7.0], &[7.0]), (7.0, 8.0));
        let chart = SeriesChart::build(&[7.0], &[], ("a", "b"), "t");
        assert_eq!(chart.x_len, 2);
        assert_eq!(chart.placeholder, None);
    }

    #[test]
    fn empty_series_shows_placeholder() {
        let chart = SeriesChart::build(&[], &[], ("a", "b"), "t");
        assert_eq!(chart.placeholder, Some(SERIES_PLACEHOLDER));
        assert_eq!(chart.y_range, (0.0, 1.0));
    }
}
