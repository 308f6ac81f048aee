use clap::Parser;

/// Equation of time table generator.
#[derive(Parser)]
#[command(
    name = "eot_table",
    version,
    about = "Fetch apparent solar time from JPL Horizons and print a per-year equation of time table as JSON"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
