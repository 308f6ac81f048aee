use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_START_YEAR: i32 = 2000;
pub const DEFAULT_END_YEAR: i32 = 2100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// One row of the ephemeris: local apparent solar time on a given date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub date: NaiveDate,
    pub hour: i32,
    pub minute: i32,
    pub second: f64,
}

/// Inclusive year range covered by the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub start: i32,
    pub end: i32,
}

impl YearBounds {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Year whose last sample pads the front of `start`.
    pub fn leading_year(&self) -> i32 {
        self.start - 1
    }

    /// Year whose first sample pads the back of `end`.
    pub fn trailing_year(&self) -> i32 {
        self.end + 1
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_YEAR,
            end: DEFAULT_END_YEAR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub bounds: YearBounds,
    pub timeout: Duration,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            bounds: YearBounds::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Samples converted to minutes and grouped by calendar year, before padding.
pub type YearMap = BTreeMap<i32, Vec<f64>>;

/// Equation of time in minutes per year.
///
/// Each sequence holds one value per day of the year plus two padding values:
/// index 0 is the previous year's last day and the final index is the next
/// year's first day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EotTable {
    pub years: BTreeMap<i32, Vec<f64>>,
}

impl EotTable {
    pub fn get(&self, year: i32) -> Option<&[f64]> {
        self.years.get(&year).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.years.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.years.keys().next_back().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.years.values().flatten().copied()
    }
}
