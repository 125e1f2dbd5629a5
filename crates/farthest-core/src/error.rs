//! Error types for farthest-core.

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading a location-history export.
///
/// All of these are fatal: nothing is aggregated from a document that
/// fails to load.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input path does not name an existing file.
    #[error("input file {path} does not exist")]
    NotFound {
        /// The path that was requested.
        path: Utf8PathBuf,
    },

    /// The file exists but could not be read.
    #[error("failed to read {path}")]
    Read {
        /// The path being read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or lacks the `locations` array.
    #[error("{path} is not a location-history document: {source}")]
    Malformed {
        /// The path being parsed.
        path: Utf8PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// A record inside `locations` is missing a field or carries a bad value.
    #[error("location record {index}: {reason}")]
    InvalidSample {
        /// Zero-based position of the record in the `locations` array.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// Result type alias using [`InputError`].
pub type InputResult<T> = Result<T, InputError>;

/// The requested output path cannot be written as a file.
///
/// Callers treat this as a warning and write to standard output instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OutputPathError {
    /// The directory that should hold the output file does not exist.
    #[error("output directory {dir} does not exist")]
    MissingDirectory {
        /// The directory that was expected to hold the output file.
        dir: Utf8PathBuf,
    },

    /// The output path names an existing directory.
    #[error("output path {path} is a directory")]
    IsDirectory {
        /// The requested output path.
        path: Utf8PathBuf,
    },
}

/// Invalid date range bounds.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RangeError {
    /// The exclusive end lies before the inclusive start.
    #[error("end date {end} is before start date {start}")]
    Inverted {
        /// Inclusive start.
        start: NaiveDate,
        /// Exclusive end.
        end: NaiveDate,
    },
}

/// Errors that can occur while ranking a phrase.
#[derive(Error, Debug)]
pub enum RankError {
    /// The phrase contained no words.
    #[error("phrase is empty")]
    EmptyPhrase,

    /// A definitions or stop-word file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// The path being read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The definitions file is not shaped like dictionary responses.
    #[error("{path} is not a definitions document: {source}")]
    Malformed {
        /// The path being parsed.
        path: Utf8PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias using [`RankError`].
pub type RankResult<T> = Result<T, RankError>;
