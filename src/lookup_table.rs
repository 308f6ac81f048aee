use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use tracing::{debug, info, warn};

use crate::error::{EotError, Result};
use crate::solar_time;
use crate::types::{EotTable, RawSample, YearBounds, YearMap};

/// Hour of day (UT) at which every ephemeris sample is taken.
pub const SAMPLE_HOUR_UT: f64 = 12.0;

/// Convert samples to minutes and group them by year, keeping file order.
pub fn group_by_year(samples: &[RawSample]) -> YearMap {
    let mut years = YearMap::new();
    for sample in samples {
        years
            .entry(sample.date.year())
            .or_default()
            .push(solar_time::sample_eot(sample));
    }
    debug!(years = years.len(), "grouped samples by year");
    years
}

/// The request window reaches exactly one day into each neighbouring year.
pub fn validate_boundaries(years: &YearMap, bounds: &YearBounds) -> Result<()> {
    for year in [bounds.leading_year(), bounds.trailing_year()] {
        let count = years.get(&year).map_or(0, Vec::len);
        if count != 1 {
            return Err(EotError::consistency(format!(
                "boundary year {year} has {count} samples, expected exactly 1"
            )));
        }
    }
    Ok(())
}

pub fn validate_year_lengths(years: &YearMap, bounds: &YearBounds) -> Result<()> {
    for year in bounds.years() {
        let expected = solar_time::days_in_year(year);
        match years.get(&year) {
            None => {
                return Err(EotError::consistency(format!(
                    "year {year} has no samples"
                )))
            }
            Some(values) if values.len() != expected => {
                return Err(EotError::consistency(format!(
                    "year {year} has {} samples, expected {expected}",
                    values.len()
                )))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn missing_year(year: i32) -> EotError {
    EotError::consistency(format!("year {year} missing while padding"))
}

/// Surround each year in `bounds` with the previous year's last value and the
/// next year's first value. The boundary years are dropped.
pub fn pad_years(years: YearMap, bounds: &YearBounds) -> Result<EotTable> {
    // First and last own value per year, collected before any sequence grows.
    let mut edges: BTreeMap<i32, (Option<f64>, Option<f64>)> = BTreeMap::new();
    let leading = years
        .get(&bounds.leading_year())
        .and_then(|v| v.last().copied())
        .ok_or_else(|| missing_year(bounds.leading_year()))?;
    edges.insert(bounds.leading_year(), (None, Some(leading)));
    let trailing = years
        .get(&bounds.trailing_year())
        .and_then(|v| v.first().copied())
        .ok_or_else(|| missing_year(bounds.trailing_year()))?;
    edges.insert(bounds.trailing_year(), (Some(trailing), None));
    for year in bounds.years() {
        let values = years.get(&year).ok_or_else(|| missing_year(year))?;
        let (first, last) = match (values.first(), values.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(missing_year(year)),
        };
        edges.insert(year, (Some(first), Some(last)));
    }

    let mut padded = BTreeMap::new();
    for (year, values) in years {
        if !bounds.contains(year) {
            continue;
        }
        let previous_last = edges
            .get(&(year - 1))
            .and_then(|e| e.1)
            .ok_or_else(|| missing_year(year - 1))?;
        let next_first = edges
            .get(&(year + 1))
            .and_then(|e| e.0)
            .ok_or_else(|| missing_year(year + 1))?;

        let mut sequence = Vec::with_capacity(values.len() + 2);
        sequence.push(previous_last);
        sequence.extend(values);
        sequence.push(next_first);
        padded.insert(year, sequence);
    }

    Ok(EotTable { years: padded })
}

/// Values outside the plausible equation of time range as `(year, index, value)`.
pub fn implausible_values(table: &EotTable) -> Vec<(i32, usize, f64)> {
    table
        .years
        .iter()
        .flat_map(|(&year, values)| {
            values
                .iter()
                .enumerate()
                .filter(|(_, v)| !solar_time::is_plausible(**v))
                .map(move |(i, &v)| (year, i, v))
        })
        .collect()
}

/// Largest absolute difference between the table and the analytic approximation,
/// over real days only.
pub fn max_model_deviation(table: &EotTable) -> f64 {
    table
        .years
        .values()
        .flat_map(|values| {
            let days = values.len().saturating_sub(2);
            values
                .iter()
                .enumerate()
                .skip(1)
                .take(days)
                .map(|(n, v)| (v - solar_time::approximate_equation_of_time(n as i32)).abs())
        })
        .fold(0.0, f64::max)
}

/// Group, validate and pad parsed samples into the final table.
pub fn build_table(samples: &[RawSample], bounds: &YearBounds) -> Result<EotTable> {
    if bounds.start > bounds.end {
        return Err(EotError::InvalidRange {
            start: bounds.start,
            end: bounds.end,
        });
    }

    let years = group_by_year(samples);
    validate_boundaries(&years, bounds)?;
    validate_year_lengths(&years, bounds)?;
    let table = pad_years(years, bounds)?;

    for (year, index, value) in implausible_values(&table) {
        warn!(year, index, value, "equation of time outside plausible range");
    }
    debug!(
        max_deviation = max_model_deviation(&table),
        "deviation from analytic approximation (minutes)"
    );
    info!(
        years = table.len(),
        start = bounds.start,
        end = bounds.end,
        "equation of time table built"
    );
    Ok(table)
}

/// Compact JSON: `{"2000":[-3.3,...],...}`.
pub fn serialize_table(table: &EotTable) -> Result<String> {
    Ok(serde_json::to_string(table)?)
}

pub fn deserialize_table(json: &str) -> Result<EotTable> {
    Ok(serde_json::from_str(json)?)
}

fn interpolate_linear(v1: Option<f64>, v2: Option<f64>, fraction: f64) -> Option<f64> {
    let a = v1?;
    let b = v2?;
    Some(a + fraction * (b - a))
}

/// Equation of time at a fractional index of a year's padded sequence.
///
/// Index 1 is noon UT on Jan 1; index 0 and the last index are the
/// neighbouring years' boundary days.
pub fn eot_on_day(table: &EotTable, year: i32, position: f64) -> Option<f64> {
    let values = table.get(year)?;
    if values.is_empty() || !position.is_finite() || position < 0.0 {
        return None;
    }
    let last = (values.len() - 1) as f64;
    if position > last {
        return None;
    }
    let idx_before = position.floor() as usize;
    let fraction = position - idx_before as f64;
    if fraction == 0.0 || idx_before + 1 >= values.len() {
        return values.get(idx_before).copied();
    }
    interpolate_linear(
        values.get(idx_before).copied(),
        values.get(idx_before + 1).copied(),
        fraction,
    )
}

/// Equation of time at an instant, interpolated between the daily noon samples.
pub fn eot_at<Tz: TimeZone>(table: &EotTable, dt: &DateTime<Tz>) -> Option<f64> {
    let utc = dt.with_timezone(&Utc);
    let utc_hours =
        utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;
    let position = utc.ordinal() as f64 + (utc_hours - SAMPLE_HOUR_UT) / 24.0;
    eot_on_day(table, utc.year(), position)
}
