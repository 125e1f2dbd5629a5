//! Date-range filtering and per-day maximum distance aggregation.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::error::RangeError;
use crate::geo::{Coordinate, DistanceFormula};
use crate::history::LocationSample;

/// Half-open range of UTC calendar days, `[start, end)`.
///
/// A range built without an end day stops at the instant it was built
/// instead of at midnight, so the current day's samples so far are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    #[serde(skip)]
    until_ms: i64,
}

impl DateRange {
    /// Create a range. `end` is exclusive and may equal `start` (empty range).
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self {
            start,
            end,
            until_ms: midnight_ms(end),
        })
    }

    /// Build a range from optional bounds.
    ///
    /// A missing start means 1970-01-01. A missing end means `now`: samples
    /// up to (not including) that instant are kept.
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<Self, RangeError> {
        // NaiveDate's default is the Unix epoch day.
        let start = start.unwrap_or_default();
        match end {
            Some(end) => Self::new(start, end),
            None => {
                let today = now.date_naive();
                if today < start {
                    return Err(RangeError::Inverted { start, end: today });
                }
                Ok(Self {
                    start,
                    end: today,
                    until_ms: now.timestamp_millis(),
                })
            }
        }
    }

    /// Inclusive first day.
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day bound. Exclusive, unless the range runs up to an instant
    /// within this day (see [`DateRange::until_ms`]).
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Exclusive upper bound in epoch milliseconds.
    pub const fn until_ms(&self) -> i64 {
        self.until_ms
    }

    /// Whether an epoch-millisecond timestamp falls inside the range.
    pub fn contains(&self, timestamp_ms: i64) -> bool {
        midnight_ms(self.start) <= timestamp_ms && timestamp_ms < self.until_ms
    }
}

fn midnight_ms(day: NaiveDate) -> i64 {
    day.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// UTC calendar day of an epoch-millisecond timestamp.
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn utc_day(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|t| t.date_naive())
}

/// Maximum observed distance (meters) per UTC day.
///
/// Iterates in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayDistanceMap {
    days: BTreeMap<NaiveDate, f64>,
}

impl DayDistanceMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a distance into the day's maximum.
    pub fn record(&mut self, day: NaiveDate, distance: f64) {
        match self.days.entry(day) {
            Entry::Vacant(slot) => {
                slot.insert(distance);
            }
            Entry::Occupied(mut slot) => {
                let max = slot.get().max(distance);
                slot.insert(max);
            }
        }
    }

    /// The maximum recorded for `day`, if any.
    pub fn get(&self, day: NaiveDate) -> Option<f64> {
        self.days.get(&day).copied()
    }

    /// Number of days with at least one sample.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether no day has been recorded.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// `(day, max distance)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.days.iter().map(|(day, distance)| (*day, *distance))
    }
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Per-day maxima.
    pub days: DayDistanceMap,
    /// Samples examined.
    pub considered: usize,
    /// Samples that fell inside the range.
    pub in_range: usize,
}

/// Compute each day's maximum distance from `home` over samples in `range`.
///
/// The result does not depend on the order of `samples`.
#[tracing::instrument(skip(samples), fields(sample_count = samples.len()))]
pub fn aggregate(
    samples: &[LocationSample],
    range: &DateRange,
    home: Coordinate,
    formula: DistanceFormula,
) -> Aggregation {
    let mut days = DayDistanceMap::new();
    let mut in_range = 0;

    for sample in samples {
        if !range.contains(sample.timestamp_ms) {
            continue;
        }
        let Some(day) = utc_day(sample.timestamp_ms) else {
            continue;
        };
        in_range += 1;
        days.record(day, formula.distance(home, sample.coordinate()));
    }

    tracing::debug!(in_range, days = days.len(), "aggregation finished");
    Aggregation {
        days,
        considered: samples.len(),
        in_range,
    }
}
