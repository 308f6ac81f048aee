#![allow(dead_code)]

use chrono::{Datelike, NaiveDate};

use eot_table::approximate_equation_of_time;

pub const HEADER: &str = "\
API VERSION: 1.2
API SOURCE: NASA/JPL Horizons API

*******************************************************************************
Target body name: Sun (10)                        {source: DE441}
Center body name: Earth (399)                     {source: DE441}
*******************************************************************************
 Date__(UT)__HR:MN     L_Ap_SOL_Time
************************************";

pub const FOOTER: &str = "\
*******************************************************************************
Column meaning:

TIME
";

/// Format apparent solar time at `12:00 + eot` as an ephemeris row.
pub fn row(date: NaiveDate, flags: &str, eot_minutes: f64) -> String {
    let total_seconds = 12.0 * 3600.0 + eot_minutes * 60.0;
    let hour = (total_seconds / 3600.0).floor();
    let minute = ((total_seconds - hour * 3600.0) / 60.0).floor();
    let second = total_seconds - hour * 3600.0 - minute * 60.0;
    format!(
        " {} 12:00 {:<2}  {:02} {:02} {:07.4}",
        date.format("%Y-%b-%d"),
        flags,
        hour as i32,
        minute as i32,
        second
    )
}

pub fn wrap(rows: &[String]) -> String {
    format!("{HEADER}\n$$SOE\n{}\n$$EOE\n{FOOTER}", rows.join("\n"))
}

/// Rows from Dec 31 before `start` through Jan 1 after `end`, using the
/// analytic approximation for the apparent time.
pub fn synthetic_rows(start: i32, end: i32) -> Vec<String> {
    let first = NaiveDate::from_ymd_opt(start - 1, 12, 31).unwrap();
    let last = NaiveDate::from_ymd_opt(end + 1, 1, 1).unwrap();
    first
        .iter_days()
        .take_while(|d| *d <= last)
        .enumerate()
        .map(|(i, d)| {
            let flags = if i % 3 == 0 { "*m" } else { "*" };
            row(d, flags, approximate_equation_of_time(d.ordinal() as i32))
        })
        .collect()
}

pub fn synthetic_response(start: i32, end: i32) -> String {
    wrap(&synthetic_rows(start, end))
}
