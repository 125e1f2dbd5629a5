//! Sorting and rendering of per-day distances.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::DayDistanceMap;

/// Column the table is sorted on (always ascending).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SortKey {
    /// Chronological.
    #[default]
    Day,
    /// Nearest day first.
    Distance,
}

impl SortKey {
    /// Returns the key name as used in config files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Distance => "distance",
        }
    }
}

/// Text rendering of a [`SortedTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// One `day<TAB>meters` line per row.
    #[default]
    Tsv,
    /// A single JSON array of `["day", meters]` pairs.
    Array,
}

impl OutputFormat {
    /// Returns the format name as used in config files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tsv => "tsv",
            Self::Array => "array",
        }
    }
}

/// One row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayDistance {
    /// UTC calendar day.
    pub day: NaiveDate,
    /// Farthest distance from home that day, in meters.
    pub meters: f64,
}

/// Rows ordered ascending on a [`SortKey`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortedTable {
    rows: Vec<DayDistance>,
}

impl SortedTable {
    /// Sort a day map on `key`.
    ///
    /// Rows start in chronological order and the sort is stable, so days
    /// with equal distances stay chronological.
    pub fn build(days: &DayDistanceMap, key: SortKey) -> Self {
        let mut rows: Vec<DayDistance> = days
            .iter()
            .map(|(day, meters)| DayDistance { day, meters })
            .collect();

        match key {
            SortKey::Day => rows.sort_by_key(|row| row.day),
            SortKey::Distance => rows.sort_by(|a, b| a.meters.total_cmp(&b.meters)),
        }

        Self { rows }
    }

    /// Rows in sorted order.
    pub fn rows(&self) -> &[DayDistance] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table in `format`. The result always ends with a newline.
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Tsv => self.render_tsv(),
            OutputFormat::Array => self.render_array(),
        }
    }

    fn render_tsv(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&format!("{}\t{}\n", row.day.format("%Y-%m-%d"), row.meters));
        }
        out
    }

    fn render_array(&self) -> String {
        let pairs: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| serde_json::json!([row.day.format("%Y-%m-%d").to_string(), row.meters]))
            .collect();
        format!("{}\n", serde_json::Value::Array(pairs))
    }
}
