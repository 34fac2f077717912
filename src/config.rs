use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CompareError;
use crate::metrics::registry::MetricKind;

/// How a comparison is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Two bars, one per mean.
    #[default]
    #[serde(rename = "mean", alias = "magnitude")]
    Magnitude,
    /// Every sample of A and B on a shared index axis.
    Series,
}

/// Session settings, passed by value into every derivation.
///
/// ```toml
/// metric = "ul"
/// chart_mode = "series"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub metric: MetricKind,
    pub chart_mode: ChartMode,
}

impl SessionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, CompareError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, CompareError> {
        let text = fs::read_to_string(path).map_err(|source| CompareError::ConfigUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.metric, MetricKind::Ping);
        assert_eq!(cfg.chart_mode, ChartMode::Magnitude);
    }

    #[test]
    fn reads_keys_and_aliases() {
        let cfg = SessionConfig::from_toml_str("metric = \"dl\"\nchart_mode = \"series\"").unwrap();
        assert_eq!(cfg.metric, MetricKind::DownlinkThroughput);
        assert_eq!(cfg.chart_mode, ChartMode::Series);

        let cfg = SessionConfig::from_toml_str("chart_mode = \"magnitude\"").unwrap();
        assert_eq!(cfg.chart_mode, ChartMode::Magnitude);
    }

    #[test]
    fn unreadable_config_file_is_not_a_log_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = SessionConfig::load(&path).unwrap_err();
        assert!(matches!(err, CompareError::ConfigUnavailable { .. }));
        assert!(err.to_string().starts_with("cannot read config "));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        fs::write(&path, "metric = \"ul\"\n").unwrap();
        let cfg = SessionConfig::load(&path).unwrap();
        assert_eq!(cfg.metric, MetricKind::UplinkThroughput);
        assert_eq!(cfg.chart_mode, ChartMode::Magnitude);
    }

    #[test]
    fn unknown_metric_is_a_config_error() {
        let err = SessionConfig::from_toml_str("metric = \"jitter\"").unwrap_err();
        assert!(matches!(err, CompareError::Config(_)));
    }
}
