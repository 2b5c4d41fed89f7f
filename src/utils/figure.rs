//! In-memory description of the two-panel metrics figure.
//!
//! A [`MetricsFigure`] is built fresh from the histories on every call and
//! holds everything the renderer draws, so nothing leaks between calls.

use std::ops::Range;

use tracing::debug;

use crate::error::Result;
use crate::training::history::{Histories, LineKind, Metric};

pub const X_LABEL: &str = "Epochs";
const RANGE_PADDING: f64 = 0.05;

/// One line on a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub model: String,
    pub metric: Metric,
    /// Position of the model in the histories; curves of one model share a colour.
    pub color_index: usize,
    pub values: Vec<f64>,
}

impl Curve {
    pub fn label(&self) -> String {
        format!("{} {}", self.model, self.metric.curve_label())
    }

    pub fn line_kind(&self) -> LineKind {
        self.metric.line_kind()
    }

    /// `(epoch, value)` pairs, epochs counted from zero.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(epoch, &value)| (epoch as f64, value))
            .collect()
    }
}

/// One subplot of the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub curves: Vec<Curve>,
}

impl Panel {
    fn new(title: &'static str, y_label: &'static str) -> Self {
        Self {
            title,
            x_label: X_LABEL,
            y_label,
            curves: Vec::new(),
        }
    }

    /// Legend entries in draw order.
    pub fn legend_entries(&self) -> Vec<String> {
        self.curves.iter().map(Curve::label).collect()
    }

    pub fn x_range(&self) -> Range<f64> {
        let longest = self.curves.iter().map(|c| c.values.len()).max().unwrap_or(0);
        0.0..longest.saturating_sub(1).max(1) as f64
    }

    /// Finite data range with a little headroom; `0..1` when there is no data.
    pub fn y_range(&self) -> Range<f64> {
        let (min, max) = self
            .curves
            .iter()
            .flat_map(|c| c.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if min > max {
            return 0.0..1.0;
        }
        let span = max - min;
        let pad = if span > 0.0 { span * RANGE_PADDING } else { 0.5 };
        (min - pad)..(max + pad)
    }
}

/// Accuracy panel on the left, loss panel on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsFigure {
    pub accuracy: Panel,
    pub loss: Panel,
}

impl MetricsFigure {
    pub fn empty() -> Self {
        Self {
            accuracy: Panel::new("Model Accuracy Comparison", "Accuracy"),
            loss: Panel::new("Model Loss Comparison", "Loss"),
        }
    }

    /// Lay out every history. Fails before anything is added if any record
    /// has series of different lengths.
    pub fn from_histories(histories: &Histories) -> Result<Self> {
        for (name, history) in histories.iter() {
            history.validate(name)?;
        }

        let mut figure = Self::empty();
        for (color_index, (name, history)) in histories.iter().enumerate() {
            debug!(model = name, epochs = history.epochs(), "Adding model curves");

            for metric in Metric::ALL {
                let curve = Curve {
                    model: name.to_string(),
                    metric,
                    color_index,
                    values: history.series(metric).to_vec(),
                };
                match metric {
                    Metric::Accuracy | Metric::ValAccuracy => figure.accuracy.curves.push(curve),
                    Metric::Loss | Metric::ValLoss => figure.loss.curves.push(curve),
                }
            }
        }
        Ok(figure)
    }

    pub fn panels(&self) -> [&Panel; 2] {
        [&self.accuracy, &self.loss]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;
    use crate::training::history::ModelHistory;

    fn history(epochs: usize) -> ModelHistory {
        let mut h = ModelHistory::new();
        for e in 0..epochs {
            let e = e as f64;
            h.record(0.5 + 0.05 * e, 0.4 + 0.05 * e, 1.0 - 0.1 * e, 1.2 - 0.1 * e);
        }
        h
    }

    #[test]
    fn test_empty_histories_give_empty_panels() {
        let figure = MetricsFigure::from_histories(&Histories::new()).unwrap();
        for panel in figure.panels() {
            assert!(panel.curves.is_empty());
            assert!(panel.legend_entries().is_empty());
            assert_eq!(panel.x_range(), 0.0..1.0);
            assert_eq!(panel.y_range(), 0.0..1.0);
        }
    }

    #[test]
    fn test_single_model_two_curves_per_panel() {
        let histories: Histories = vec![("cnn", history(6))].into_iter().collect();
        let figure = MetricsFigure::from_histories(&histories).unwrap();

        assert_eq!(figure.accuracy.title, "Model Accuracy Comparison");
        assert_eq!(figure.accuracy.y_label, "Accuracy");
        assert_eq!(figure.loss.title, "Model Loss Comparison");
        assert_eq!(figure.loss.y_label, "Loss");

        for panel in figure.panels() {
            assert_eq!(panel.x_label, "Epochs");
            assert_eq!(panel.curves.len(), 2);
            assert_eq!(panel.legend_entries().len(), 2);
            assert_eq!(panel.curves[0].line_kind(), LineKind::Solid);
            assert_eq!(panel.curves[1].line_kind(), LineKind::Dashed);
            assert!(panel.curves.iter().all(|c| c.points().len() == 6));
            assert_eq!(panel.x_range(), 0.0..5.0);
        }
        assert_eq!(
            figure.accuracy.legend_entries(),
            vec!["cnn Train Accuracy", "cnn Validation Accuracy"]
        );
        assert_eq!(
            figure.loss.legend_entries(),
            vec!["cnn Train Loss", "cnn Validation Loss"]
        );
    }

    #[test]
    fn test_draw_order_follows_insertion_order() {
        let histories: Histories = vec![("rnn", history(3)), ("cnn", history(8))]
            .into_iter()
            .collect();
        let figure = MetricsFigure::from_histories(&histories).unwrap();

        assert_eq!(figure.accuracy.curves.len(), 4);
        assert_eq!(figure.loss.curves.len(), 4);
        assert_eq!(
            figure.loss.legend_entries(),
            vec![
                "rnn Train Loss",
                "rnn Validation Loss",
                "cnn Train Loss",
                "cnn Validation Loss",
            ]
        );
        let colors: Vec<_> = figure.accuracy.curves.iter().map(|c| c.color_index).collect();
        assert_eq!(colors, vec![0, 0, 1, 1]);
        // Lengths only have to agree within a record.
        assert_eq!(figure.accuracy.curves[0].values.len(), 3);
        assert_eq!(figure.accuracy.curves[2].values.len(), 8);
        assert_eq!(figure.accuracy.x_range(), 0.0..7.0);
    }

    #[test]
    fn test_points_are_plotted_as_is() {
        let mut h = ModelHistory::new();
        h.record(0.9, 0.8, 0.3, f64::NAN);
        h.record(0.95, 0.85, 0.2, 0.4);
        let histories: Histories = vec![("m", h)].into_iter().collect();
        let figure = MetricsFigure::from_histories(&histories).unwrap();

        assert_eq!(figure.accuracy.curves[0].points(), vec![(0.0, 0.9), (1.0, 0.95)]);
        assert!(figure.loss.curves[1].points()[0].1.is_nan());

        // NaN is left out of the axis range.
        let range = figure.loss.y_range();
        assert!(range.start < 0.2 && range.end > 0.4);
        assert!(range.start.is_finite() && range.end.is_finite());
    }

    #[test]
    fn test_flat_series_still_gets_a_range() {
        let mut h = ModelHistory::new();
        h.record(1.0, 1.0, 0.0, 0.0);
        let histories: Histories = vec![("flat", h)].into_iter().collect();
        let figure = MetricsFigure::from_histories(&histories).unwrap();

        assert_eq!(figure.accuracy.y_range(), 0.5..1.5);
        assert_eq!(figure.loss.y_range(), -0.5..0.5);
    }

    #[test]
    fn test_mismatched_record_is_rejected() {
        let mut bad = history(5);
        bad.val_accuracy.truncate(3);
        let histories: Histories = vec![("good", history(4)), ("bad", bad)]
            .into_iter()
            .collect();

        let err = MetricsFigure::from_histories(&histories).unwrap_err();
        match err {
            PlotError::LengthMismatch { model, metric, expected, actual } => {
                assert_eq!(model, "bad");
                assert_eq!(metric, Metric::ValAccuracy);
                assert_eq!((expected, actual), (5, 3));
            }
            other => panic!("expected LengthMismatch, got {:?}", other),
        }
    }
}
