pub mod csv;

pub use csv::CsvRecorder;
