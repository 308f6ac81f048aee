use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use eot_table::{
    build_table, parse_ephemeris, serialize_table, HorizonsClient, TableConfig, YearBounds,
};

/// Fetch, parse, pad and print the table on stdout.
pub fn run(config: &TableConfig) -> Result<()> {
    let client = HorizonsClient::new().with_timeout(config.timeout);
    let mut stdout = std::io::stdout().lock();
    write_table(&client, &config.bounds, &mut stdout)
}

/// `out` is only touched once the whole table has been serialized.
pub fn write_table<W: Write>(
    client: &HorizonsClient,
    bounds: &YearBounds,
    out: &mut W,
) -> Result<()> {
    info!(
        url = client.base_url(),
        start = bounds.start,
        end = bounds.end,
        "fetching ephemeris"
    );
    let body = client.fetch(bounds).context("fetch stage failed")?;

    let samples = parse_ephemeris(&body).context("parse stage failed")?;
    info!(samples = samples.len(), "ephemeris parsed");

    let table = build_table(&samples, bounds).context("table stage failed")?;
    let json = serialize_table(&table).context("serialize stage failed")?;

    out.write_all(json.as_bytes())
        .and_then(|_| out.flush())
        .context("write stage failed")?;
    Ok(())
}
