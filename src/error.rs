use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Which side(s) of a comparison came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSides {
    A,
    B,
    Both,
}

impl fmt::Display for MissingSides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingSides::A => f.write_str("A"),
            MissingSides::B => f.write_str("B"),
            MissingSides::Both => f.write_str("A and B"),
        }
    }
}

/// Failures visible to the caller of a session action.
///
/// Line-level problems (no timestamp, no tag, unreadable number) never show up
/// here; extraction skips those lines.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("cannot read source {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no numeric {token} values in {sides}")]
    NoMatchingData { sides: MissingSides, token: String },

    #[error("cannot read config {}", path.display())]
    ConfigUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("csv export failed: {0}")]
    Export(#[from] csv::Error),

    #[error("json output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
