//! Tabular normalization and output.

mod console;
mod csv_out;
mod table;

pub use console::render_value_counts;
pub use csv_out::write_csv;
pub use table::{MISSING, Table, VALUE_DELIMITER};
