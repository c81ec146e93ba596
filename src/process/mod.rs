pub mod casing;
pub mod convert;
pub mod date_parser;
pub mod utils;

pub use casing::uppercase_column;
pub use convert::{clean_occurrences, parse_day_first_dates, select_columns};
