//! Flight Route Explorer - Application Library
//!
//! Thin shell over `flight-route-lib`: load a dataset directory, turn the
//! command-line flags into a selection state and print what a map would draw.

pub mod logging;
pub mod output;
pub mod settings;

use anyhow::Context;
use flight_route_lib::{Dataset, SelectionResolver, SelectionState};
use settings::{OutputFormat, Settings};
use std::io::Write;

/// Run the explorer with parsed settings, writing results to `out`
pub fn run<W: Write>(settings: &Settings, out: &mut W) -> anyhow::Result<()> {
    let dataset = Dataset::load_dir(&settings.data_dir)
        .with_context(|| format!("loading dataset from {}", settings.data_dir.display()))?;

    let info = dataset.info();
    tracing::info!(
        "Dataset: {} airports, {} airlines, {} routes ({} unusable)",
        info.airport_count,
        info.airline_count,
        info.route_count,
        info.dangling_route_count
    );

    let state = checked_state(&dataset, settings.selection_state());
    let resolver = SelectionResolver::new(&dataset, settings.config());
    let resolution = resolver.resolve(&state);

    match settings.format {
        OutputFormat::Summary => output::write_summary(out, &resolution)?,
        OutputFormat::Json => output::write_json(out, &state, &resolution)?,
    }
    Ok(())
}

/// Drop an airport selection the dataset does not know about
fn checked_state(dataset: &Dataset, state: SelectionState) -> SelectionState {
    if let Some(code) = state
        .selected_airport()
        .filter(|code| dataset.airport(code).is_none())
    {
        tracing::warn!("Unknown airport {code}, showing the airline network instead");
        return state.without_airport();
    }
    state
}
