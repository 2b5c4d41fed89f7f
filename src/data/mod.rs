pub mod keras_csv;
