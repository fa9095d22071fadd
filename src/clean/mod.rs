//! Row cleaning
//!
//! Report rows need two fixes before field mapping: a stable synthetic id
//! (reports carry no unique key of their own) and dates whose timezone sits
//! in a separate column.

mod cleaner;

pub use cleaner::{merge_timezone_columns, RowCleaner};
