use clap::{Parser, ValueEnum};
use flight_route_lib::{Config, FilterState, Selection, SelectionState};
use std::path::PathBuf;

/// How resolved routes are printed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per route
    #[default]
    Summary,
    /// The full resolution as JSON
    Json,
}

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Flight Route Explorer - resolve the routes a flight network map would draw
pub struct Settings {
    /// Directory containing airports.json, airlines.json, routes.json and optionally aircraft.json
    #[clap(short, long, value_name = "DIR")]
    pub data_dir: PathBuf,

    /// IATA code of the selected airport (omit for the airline network view)
    #[clap(short = 'p', long, value_name = "IATA")]
    pub airport: Option<String>,

    /// Restrict to routes operated by these airlines (repeatable)
    #[clap(short, long = "airline", value_name = "IATA")]
    pub airlines: Vec<String>,

    /// Restrict to routes flown with these aircraft types (repeatable)
    #[clap(short = 't', long = "aircraft", value_name = "TYPE")]
    pub aircraft: Vec<String>,

    /// Also match airlines that only codeshare on a route
    #[clap(short = 'c', long, default_value = "false")]
    pub include_codeshares: bool,

    /// Path interpolation steps for the selected airport's routes
    #[clap(long, default_value = "50")]
    pub airport_path_steps: usize,

    /// Path interpolation steps for the airline network view
    #[clap(long, default_value = "30")]
    pub network_path_steps: usize,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,
}

impl Settings {
    /// Parse from the command line, exiting with usage on error
    pub fn from_cli() -> Self {
        match Settings::try_parse() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Resolver tuning derived from the flags
    pub fn config(&self) -> Config {
        Config {
            airport_path_steps: self.airport_path_steps,
            network_path_steps: self.network_path_steps,
            ..Config::default()
        }
    }

    /// Filters from the flags, codes normalized to upper case
    pub fn filters(&self) -> FilterState {
        FilterState::new()
            .with_airlines(self.airlines.iter().map(|code| normalize_code(code)))
            .with_aircraft(self.aircraft.iter().map(|code| code.trim().to_string()))
            .with_codeshares(self.include_codeshares)
    }

    /// Initial selection state; an empty airport code counts as no selection
    pub fn selection_state(&self) -> SelectionState {
        let selection = match self.airport.as_deref().map(normalize_code) {
            Some(code) if !code.is_empty() => Selection::Airport(code),
            _ => Selection::None,
        };
        SelectionState::new(selection, self.filters())
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
