//! Side-by-side accuracy and loss curves for a set of trained model histories.
//!
//! ```no_run
//! use model_metrics_plot::{plot_all_metrics, Histories, ModelHistory, PlotConfig};
//!
//! let mut cnn = ModelHistory::new();
//! cnn.record(0.71, 0.68, 0.83, 0.91);
//! cnn.record(0.80, 0.74, 0.55, 0.70);
//!
//! let mut histories = Histories::new();
//! histories.insert("cnn", cnn);
//!
//! let output = plot_all_metrics("results", &histories, &PlotConfig::headless())?;
//! println!("saved {}", output.path.display());
//! # Ok::<(), model_metrics_plot::PlotError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod training;
pub mod utils;

pub use config::PlotConfig;
pub use error::{PlotError, Result};
pub use training::history::{Histories, LineKind, Metric, ModelHistory};
pub use utils::display::DisplayMode;
pub use utils::figure::{Curve, MetricsFigure, Panel};
pub use utils::plot::{plot_all_metrics, PlotOutput, OUTPUT_FILE_NAME};
