//! Core library for farthest.
//!
//! This crate provides the foundational types and functionality used by the
//! `farthest` CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`history`] - Location-history export loading
//! - [`geo`] - Coordinates and distance formulas
//! - [`aggregate`] - Date-range filtering and per-day maxima
//! - [`table`] - Sorting and rendering
//! - [`output`] - Output destination handling
//! - [`rank`] - Phrase ranking from dictionary definitions
//! - [`stop_words`] - Stop-word sets for ranking
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use camino::Utf8Path;
//! use chrono::NaiveDate;
//! use farthest_core::{Coordinate, DateRange, DistanceFormula, SortKey, SortedTable};
//!
//! let samples = farthest_core::history::load(Utf8Path::new("Records.json"))?;
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
//! )?;
//! let home = Coordinate::new(52.37, 4.89);
//! let agg = farthest_core::aggregate::aggregate(&samples, &range, home, DistanceFormula::Cosine);
//! let table = SortedTable::build(&agg.days, SortKey::Distance);
//! print!("{}", table.render(farthest_core::OutputFormat::Tsv));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(unsafe_code)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod geo;
pub mod history;
pub mod output;
pub mod rank;
pub mod stop_words;
pub mod table;

pub use aggregate::{Aggregation, DateRange, DayDistanceMap};
pub use config::{Config, ConfigLoader, LogLevel};
pub use error::{ConfigError, ConfigResult, InputError, OutputPathError, RangeError, RankError};
pub use geo::{Coordinate, DistanceFormula};
pub use history::LocationSample;
pub use output::Destination;
pub use stop_words::StopWords;
pub use table::{OutputFormat, SortKey, SortedTable};
