use crate::types::RawSample;

pub const MINUTES_PER_HOUR: f64 = 60.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SOLAR_NOON_HOURS: f64 = 12.0;

/// Largest magnitude, in minutes, accepted as a physically plausible equation of time.
pub const EOT_PLAUSIBLE_LIMIT: f64 = 20.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn leap_year(year: i32) -> bool {
    (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
}

pub fn days_in_year(year: i32) -> usize {
    if leap_year(year) {
        366
    } else {
        365
    }
}

/// Offset of local apparent solar time from 12:00, in minutes.
///
/// No wrap-around is applied: a reading just after midnight yields roughly
/// -720 rather than a small positive value.
pub fn apparent_time_to_eot(hour: i32, minute: i32, second: f64) -> f64 {
    let hours =
        hour as f64 + (minute as f64 + second / SECONDS_PER_MINUTE) / MINUTES_PER_HOUR;
    (hours - SOLAR_NOON_HOURS) * MINUTES_PER_HOUR
}

/// Round the exact binary value to two decimals, ties to even.
pub fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

pub fn sample_eot(sample: &RawSample) -> f64 {
    round_to_hundredths(apparent_time_to_eot(
        sample.hour,
        sample.minute,
        sample.second,
    ))
}

pub fn is_plausible(eot: f64) -> bool {
    eot.abs() <= EOT_PLAUSIBLE_LIMIT
}

pub fn intermediate_angle_b(n: i32) -> f64 {
    deg_to_rad((n - 1) as f64 * (360.0 / 365.0))
}

/// Fourier-series approximation of the equation of time for day-of-year `n`,
/// accurate to roughly half a minute.
pub fn approximate_equation_of_time(n: i32) -> f64 {
    let b = intermediate_angle_b(n);
    229.18
        * (0.000075
            + 0.001868 * b.cos()
            - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.040849 * (2.0 * b).sin())
}
