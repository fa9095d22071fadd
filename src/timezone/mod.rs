//! Timezone resolution for report timestamps
//!
//! Report CSVs split timestamps into a local date/time column and a separate
//! timezone abbreviation column (`CET`, `PST`, ...). Those abbreviations are
//! not UTC offsets, so they are resolved through a static lookup table.
//!
//! # Example
//!
//! ```rust
//! use tap_adyen::timezone::resolve;
//!
//! let ts = resolve("2021-01-01 CET").unwrap();
//! assert_eq!(ts, "2021-01-01T00:00:00+01:00");
//! ```

mod resolver;
mod table;

pub use resolver::{parse, resolve};
pub use table::{offset_seconds, TIMEZONE_OFFSETS};

#[cfg(test)]
mod tests;
