pub mod config;
pub mod error;
pub mod export;
pub mod session;

pub mod data {
    pub mod timestamp;
    pub mod tag;
    pub mod utils;
    pub mod columnar;
    pub mod loader;
    pub mod summary;
}

pub mod metrics {
    pub mod registry;
    pub mod comparison;
}

pub mod plot {
    pub mod layout;
    pub mod plot_html;
    pub mod table;
}

pub use config::{ChartMode, SessionConfig};
pub use error::CompareError;
pub use metrics::registry::MetricKind;
pub use session::{Comparison, Session, SessionEvent, Side};
