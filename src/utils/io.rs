use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::data::keras_csv;
use crate::error::Result;
use crate::training::history::{Histories, ModelHistory};

/// Load a JSON object of model name to history, keeping the file's order.
pub fn load_histories<P: AsRef<Path>>(path: P) -> Result<Histories> {
    let file = File::open(path)?;
    let histories = serde_json::from_reader(BufReader::new(file))?;
    Ok(histories)
}

pub fn save_histories<P: AsRef<Path>>(path: P, histories: &Histories) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, histories)?;
    writer.flush()?;
    Ok(())
}

/// Load one model's history from a Keras CSV log (`.csv`) or a JSON record.
pub fn load_history<P: AsRef<Path>>(model: &str, path: P) -> Result<ModelHistory> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        keras_csv::load_csv_history(model, path)
    } else {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
