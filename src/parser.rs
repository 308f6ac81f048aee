use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EotError, Result};
use crate::types::RawSample;

pub const START_OF_EPHEMERIS: &str = "$$SOE";
pub const END_OF_EPHEMERIS: &str = "$$EOE";

const DATE_FORMAT: &str = "%Y-%b-%d";
const MIN_ROW_TOKENS: usize = 4;

/// Lines strictly between the `$$SOE` and `$$EOE` markers.
pub fn extract_data_rows(text: &str) -> Result<Vec<&str>> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines
        .iter()
        .position(|l| *l == START_OF_EPHEMERIS)
        .ok_or_else(|| {
            EotError::format(format!(
                "missing {START_OF_EPHEMERIS} marker in response: {}",
                preview(text)
            ))
        })?;
    let end = lines
        .iter()
        .position(|l| *l == END_OF_EPHEMERIS)
        .ok_or_else(|| {
            EotError::format(format!(
                "missing {END_OF_EPHEMERIS} marker in response: {}",
                preview(text)
            ))
        })?;
    if end < start {
        return Err(EotError::format(format!(
            "{END_OF_EPHEMERIS} (line {}) precedes {START_OF_EPHEMERIS} (line {})",
            end + 1,
            start + 1
        )));
    }
    Ok(lines[start + 1..end].to_vec())
}

/// Parse one row such as ` 2000-Jan-01 12:00 *m  11 56 43.2074`.
///
/// Presence flags between the date and the time vary per row, so hour,
/// minute and second are taken from the end.
pub fn parse_row(line: &str) -> Result<RawSample> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_ROW_TOKENS {
        return Err(EotError::format(format!(
            "expected at least {MIN_ROW_TOKENS} tokens, found {}: '{line}'",
            tokens.len()
        )));
    }

    let date = NaiveDate::parse_from_str(tokens[0], DATE_FORMAT)
        .map_err(|e| EotError::format(format!("invalid date '{}': {e}", tokens[0])))?;

    let n = tokens.len();
    let hour: i32 = tokens[n - 3]
        .parse()
        .map_err(|_| EotError::format(format!("invalid hour '{}'", tokens[n - 3])))?;
    let minute: i32 = tokens[n - 2]
        .parse()
        .map_err(|_| EotError::format(format!("invalid minute '{}'", tokens[n - 2])))?;
    let second: f64 = tokens[n - 1]
        .parse()
        .map_err(|_| EotError::format(format!("invalid second '{}'", tokens[n - 1])))?;

    Ok(RawSample {
        date,
        hour,
        minute,
        second,
    })
}

/// All samples of a response body, in file order.
pub fn parse_ephemeris(text: &str) -> Result<Vec<RawSample>> {
    let rows = extract_data_rows(text)?;
    let samples = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            parse_row(row).map_err(|e| match e {
                EotError::Format { reason } => {
                    EotError::format(format!("data row {}: {reason}", i + 1))
                }
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(rows = samples.len(), "parsed ephemeris rows");
    Ok(samples)
}

fn preview(text: &str) -> String {
    const MAX: usize = 200;
    let trimmed = text.trim();
    match trimmed.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
