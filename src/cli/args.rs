//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Resolve Steam profile location codes to a location record printed as JSON
#[derive(Parser, Debug)]
#[command(name = "steamloc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Country code (Steam `loccountrycode`), e.g. US
    pub country_code: String,

    /// State code (Steam `locstatecode`), may be empty
    pub state_code: String,

    /// City id (Steam `loccityid`); text without leading digits reads as 0 unless --strict
    #[arg(allow_hyphen_values = true)]
    pub city_id: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Steam location dataset (steam_countries.json)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub dataset: Option<PathBuf>,

    /// Config file to use instead of the global one
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Reject city ids that are not decimal integers
    #[arg(long)]
    pub strict: bool,

    /// Pretty-print the JSON record
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    /// Positional arguments in invocation order.
    pub fn positional(&self) -> [&str; 3] {
        [self.country_code.as_str(), self.state_code.as_str(), self.city_id.as_str()]
    }
}
