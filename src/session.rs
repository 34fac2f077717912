//! In-memory comparison session.
//!
//! The retained source text of each side is the only durable state. Series and
//! comparisons are recomputed from it on every event that needs them.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{ChartMode, SessionConfig};
use crate::data::columnar::MetricSeries;
use crate::data::loader::{extract_from_text, read_lossy, source_name};
use crate::data::summary::summarize_text;
use crate::error::CompareError;
use crate::metrics::comparison::{compare, Classification, ComparisonResult};
use crate::metrics::registry::MetricKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    A,
    B,
}

/// Raw text kept for one side.
#[derive(Debug, Clone, PartialEq)]
pub enum RetainedSource {
    /// A raw device log, read with the strict file rules.
    File {
        name: String,
        path: PathBuf,
        text: String,
    },
    /// A pasted or previously rendered summary, read with the paste rules.
    Pasted { text: String },
}

impl RetainedSource {
    pub fn from_path(path: &Path) -> Result<Self, CompareError> {
        let text = read_lossy(path)?;
        Ok(RetainedSource::File {
            name: source_name(path),
            path: path.to_path_buf(),
            text,
        })
    }

    /// Derive the series for `kind`. Pure given the retained text.
    pub fn derive(&self, kind: MetricKind) -> MetricSeries {
        match self {
            RetainedSource::File { name, text, .. } => extract_from_text(text, name, kind),
            RetainedSource::Pasted { text } => summarize_text(text, kind).series,
        }
    }
}

/// Named actions a front end can send.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    SourceLoaded { side: Side, path: PathBuf },
    TextCommitted { side: Side, text: String },
    MetricChanged(MetricKind),
    ChartModeChanged(ChartMode),
    CompareRequested,
}

/// A comparison together with the series it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub metric: MetricKind,
    pub chart_mode: ChartMode,
    pub a: MetricSeries,
    pub b: MetricSeries,
    pub result: ComparisonResult,
}

impl Comparison {
    pub fn title(&self) -> String {
        format!("{} AvgResult Comparison", self.metric.label())
    }
}

#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    a: Option<RetainedSource>,
    b: Option<RetainedSource>,
    last: Option<Comparison>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn source(&self, side: Side) -> Option<&RetainedSource> {
        match side {
            Side::A => self.a.as_ref(),
            Side::B => self.b.as_ref(),
        }
    }

    /// Most recent comparison that had data on both sides.
    pub fn last_comparison(&self) -> Option<&Comparison> {
        self.last.as_ref()
    }

    /// Current series for one side under the active metric.
    pub fn series(&self, side: Side) -> Option<MetricSeries> {
        self.source(side).map(|src| src.derive(self.config.metric))
    }

    /// Apply one event.
    ///
    /// Returns the comparison when the event produced one. Errors leave the
    /// retained sources and the last comparison as they were.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Option<&Comparison>, CompareError> {
        match event {
            SessionEvent::SourceLoaded { side, path } => {
                let source = RetainedSource::from_path(&path)?;
                tracing::info!(?side, path = %path.display(), "source loaded");
                self.retain(side, source);
                Ok(None)
            }
            SessionEvent::TextCommitted { side, text } => {
                tracing::info!(?side, bytes = text.len(), "text committed");
                self.retain(side, RetainedSource::Pasted { text });
                Ok(None)
            }
            SessionEvent::MetricChanged(kind) => {
                self.config.metric = kind;
                self.recompare_if_loaded()
            }
            SessionEvent::ChartModeChanged(mode) => {
                self.config.chart_mode = mode;
                self.recompare_if_loaded()
            }
            SessionEvent::CompareRequested => self.compare().map(Some),
        }
    }

    /// Derive both sides and compare them under the active metric.
    pub fn compare(&mut self) -> Result<&Comparison, CompareError> {
        let kind = self.config.metric;
        let a = self.series(Side::A).unwrap_or_else(|| MetricSeries::new("A"));
        let b = self.series(Side::B).unwrap_or_else(|| MetricSeries::new("B"));
        let result = compare(a.samples(), b.samples());

        if let Classification::Missing { sides } = result.classification {
            tracing::warn!(%sides, token = kind.token(), "comparison skipped, no numeric values");
            return Err(CompareError::NoMatchingData {
                sides,
                token: kind.token().to_string(),
            });
        }

        Ok(self.last.insert(Comparison {
            metric: kind,
            chart_mode: self.config.chart_mode,
            a,
            b,
            result,
        }))
    }

    fn retain(&mut self, side: Side, source: RetainedSource) {
        match side {
            Side::A => self.a = Some(source),
            Side::B => self.b = Some(source),
        }
    }

    fn recompare_if_loaded(&mut self) -> Result<Option<&Comparison>, CompareError> {
        if self.a.is_none() || self.b.is_none() {
            return Ok(None);
        }
        self.compare().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MissingSides;

    fn pasted(session: &mut Session, side: Side, text: &str) {
        session
            .apply(SessionEvent::TextCommitted {
                side,
                text: text.to_string(),
            })
            .unwrap();
    }

    #[test]
    fn compare_uses_both_pasted_sides() {
        let mut session = Session::new(SessionConfig::default());
        pasted(&mut session, Side::A, "[File] a.txt\nPing-AvgResult=100");
        pasted(&mut session, Side::B, "Ping-AvgResult=120");

        let cmp = session.apply(SessionEvent::CompareRequested).unwrap().unwrap();
        assert_eq!(cmp.a.source, "a.txt");
        assert_eq!(cmp.b.source, "Pasted");
        assert_eq!(cmp.result.delta_label(), "+20.00%");
    }

    #[test]
    fn metric_change_rederives_without_stale_samples() {
        let mut session = Session::new(SessionConfig::default());
        pasted(&mut session, Side::A, "Ping-AvgResult=10\nUp-AvgResult=200");
        pasted(&mut session, Side::B, "Ping-AvgResult=20\nUp-AvgResult=100");
        session.compare().unwrap();

        let cmp = session
            .apply(SessionEvent::MetricChanged(MetricKind::UplinkThroughput))
            .unwrap()
            .unwrap();
        assert_eq!(cmp.metric, MetricKind::UplinkThroughput);
        assert_eq!(cmp.a.samples(), &[200.0]);
        assert_eq!(cmp.result.delta_percent, Some(-50.0));
    }

    #[test]
    fn missing_data_keeps_previous_result() {
        let mut session = Session::new(SessionConfig::default());
        pasted(&mut session, Side::A, "Ping-AvgResult=10");
        pasted(&mut session, Side::B, "Ping-AvgResult=20");
        session.compare().unwrap();

        let err = session
            .apply(SessionEvent::MetricChanged(MetricKind::DownlinkThroughput))
            .unwrap_err();
        match err {
            CompareError::NoMatchingData { sides, token } => {
                assert_eq!(sides, MissingSides::Both);
                assert_eq!(token, "Down-AvgResult");
            }
            other => panic!("unexpected error {other:?}"),
        }
        let last = session.last_comparison().unwrap();
        assert_eq!(last.metric, MetricKind::Ping);
        assert_eq!(last.result.mean_b, Some(20.0));
    }

    #[test]
    fn unreadable_path_leaves_side_untouched() {
        let mut session = Session::new(SessionConfig::default());
        pasted(&mut session, Side::A, "Ping-AvgResult=10");

        let err = session
            .apply(SessionEvent::SourceLoaded {
                side: Side::A,
                path: PathBuf::from("/no/such/dumpstate.txt"),
            })
            .unwrap_err();
        assert!(matches!(err, CompareError::SourceUnavailable { .. }));
        assert_eq!(
            session.source(Side::A),
            Some(&RetainedSource::Pasted {
                text: "Ping-AvgResult=10".to_string()
            })
        );
    }

    #[test]
    fn toggles_before_both_sides_do_not_compare() {
        let mut session = Session::new(SessionConfig::default());
        pasted(&mut session, Side::A, "Ping-AvgResult=10");
        let out = session
            .apply(SessionEvent::ChartModeChanged(ChartMode::Series))
            .unwrap();
        assert!(out.is_none());
        assert_eq!(session.config().chart_mode, ChartMode::Series);
    }

    #[test]
    fn zero_baseline_is_still_a_comparison() {
        let mut session = Session::new(SessionConfig::default());
        pasted(&mut session, Side::A, "Ping-AvgResult=0");
        pasted(&mut session, Side::B, "Ping-AvgResult=50");
        let cmp = session.compare().unwrap();
        assert_eq!(cmp.result.classification, Classification::BaselineZero);
    }
}
