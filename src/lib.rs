pub mod error;
pub mod horizons;
pub mod lookup_table;
pub mod parser;
pub mod solar_time;
pub mod types;

pub use error::{EotError, Result};

pub use horizons::{ephemeris_query, HorizonsClient, HORIZONS_API_URL, LOCAL_APPARENT_SOLAR_TIME};

pub use lookup_table::{
    build_table, deserialize_table, eot_at, eot_on_day, group_by_year, implausible_values,
    max_model_deviation, pad_years, serialize_table, validate_boundaries, validate_year_lengths,
};

pub use parser::{extract_data_rows, parse_ephemeris, parse_row, END_OF_EPHEMERIS, START_OF_EPHEMERIS};

pub use solar_time::{
    apparent_time_to_eot, approximate_equation_of_time, days_in_year, is_plausible, leap_year,
    round_to_hundredths, sample_eot, EOT_PLAUSIBLE_LIMIT,
};

pub use types::{
    EotTable, RawSample, TableConfig, YearBounds, YearMap, DEFAULT_END_YEAR, DEFAULT_START_YEAR,
    DEFAULT_TIMEOUT_SECS,
};
