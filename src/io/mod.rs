//! File output for solution frames.

mod csv;

pub use csv::{CsvError, write_frame};
