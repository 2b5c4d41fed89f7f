//! Import of Keras `CSVLogger` output.
//!
//! The logger writes one header row followed by one row per epoch. Column
//! order depends on the Keras version, so columns are looked up by name.

use csv::{Reader, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{PlotError, Result};
use crate::training::history::{Metric, ModelHistory};

fn find_column(headers: &StringRecord, metric: Metric) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim();
        header == metric.key() || Some(header) == metric.legacy_key()
    })
}

/// Read a history from CSV text. `model` only names the record in errors.
pub fn read_history<R: Read>(model: &str, reader: R) -> Result<ModelHistory> {
    let mut rdr = Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut columns = [0usize; 4];
    for (column, metric) in columns.iter_mut().zip(Metric::ALL) {
        *column = find_column(&headers, metric).ok_or_else(|| PlotError::MissingField {
            model: model.to_string(),
            field: metric.key().to_string(),
        })?;
    }

    let mut history = ModelHistory::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;

        let mut values = [0f64; 4];
        for ((value, metric), &column) in values.iter_mut().zip(Metric::ALL).zip(&columns) {
            let cell = record.get(column).unwrap_or("").trim();
            *value = cell.parse().map_err(|_| PlotError::InvalidValue {
                model: model.to_string(),
                field: metric.key().to_string(),
                row: row + 1,
                value: cell.to_string(),
            })?;
        }

        history.record(values[0], values[1], values[2], values[3]);
    }

    Ok(history)
}

pub fn load_csv_history<P: AsRef<Path>>(model: &str, path: P) -> Result<ModelHistory> {
    let file = File::open(path)?;
    read_history(model, file)
}
