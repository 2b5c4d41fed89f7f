use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PlotError;

/// One of the four per-epoch series recorded for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Accuracy,
    ValAccuracy,
    Loss,
    ValLoss,
}

/// How a curve is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Dashed,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Accuracy,
        Metric::ValAccuracy,
        Metric::Loss,
        Metric::ValLoss,
    ];

    /// Key of the series in a history record.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Accuracy => "accuracy",
            Metric::ValAccuracy => "val_accuracy",
            Metric::Loss => "loss",
            Metric::ValLoss => "val_loss",
        }
    }

    /// Older Keras releases wrote `acc`/`val_acc`.
    pub fn legacy_key(self) -> Option<&'static str> {
        match self {
            Metric::Accuracy => Some("acc"),
            Metric::ValAccuracy => Some("val_acc"),
            Metric::Loss | Metric::ValLoss => None,
        }
    }

    pub fn curve_label(self) -> &'static str {
        match self {
            Metric::Accuracy => "Train Accuracy",
            Metric::ValAccuracy => "Validation Accuracy",
            Metric::Loss => "Train Loss",
            Metric::ValLoss => "Validation Loss",
        }
    }

    pub fn line_kind(self) -> LineKind {
        match self {
            Metric::Accuracy | Metric::Loss => LineKind::Solid,
            Metric::ValAccuracy | Metric::ValLoss => LineKind::Dashed,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-epoch training and validation metrics of one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelHistory {
    #[serde(alias = "acc")]
    pub accuracy: Vec<f64>,
    #[serde(alias = "val_acc")]
    pub val_accuracy: Vec<f64>,
    pub loss: Vec<f64>,
    pub val_loss: Vec<f64>,
}

impl ModelHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, accuracy: f64, val_accuracy: f64, loss: f64, val_loss: f64) {
        self.accuracy.push(accuracy);
        self.val_accuracy.push(val_accuracy);
        self.loss.push(loss);
        self.val_loss.push(val_loss);
    }

    pub fn epochs(&self) -> usize {
        self.accuracy.len()
    }

    pub fn series(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Accuracy => &self.accuracy,
            Metric::ValAccuracy => &self.val_accuracy,
            Metric::Loss => &self.loss,
            Metric::ValLoss => &self.val_loss,
        }
    }

    /// All four series must cover the same epochs.
    pub fn validate(&self, model: &str) -> Result<(), PlotError> {
        let expected = self.epochs();
        for metric in Metric::ALL {
            let actual = self.series(metric).len();
            if actual != expected {
                return Err(PlotError::LengthMismatch {
                    model: model.to_string(),
                    metric,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Model histories keyed by name, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histories {
    entries: Vec<(String, ModelHistory)>,
}

impl Histories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replacing an existing name keeps its original position.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        history: ModelHistory,
    ) -> Option<ModelHistory> {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, history)),
            None => {
                self.entries.push((name, history));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ModelHistory> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, history)| history)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelHistory)> {
        self.entries
            .iter()
            .map(|(name, history)| (name.as_str(), history))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, ModelHistory)> for Histories {
    fn from_iter<I: IntoIterator<Item = (S, ModelHistory)>>(iter: I) -> Self {
        let mut histories = Histories::new();
        for (name, history) in iter {
            histories.insert(name, history);
        }
        histories
    }
}

impl Serialize for Histories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, history) in &self.entries {
            map.serialize_entry(name, history)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Histories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HistoriesVisitor;

        impl<'de> Visitor<'de> for HistoriesVisitor {
            type Value = Histories;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of model names to training histories")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Histories, A::Error> {
                let mut histories = Histories::new();
                while let Some((name, history)) = map.next_entry::<String, ModelHistory>()? {
                    histories.insert(name, history);
                }
                Ok(histories)
            }
        }

        deserializer.deserialize_map(HistoriesVisitor)
    }
}
