//! Printing resolved routes

use flight_route_lib::{Resolution, ResolvedRoute, SelectionState};
use serde::Serialize;
use std::io::Write;

/// JSON document written with `--format json`
#[derive(Serialize)]
struct JsonOutput<'s, 'a> {
    state: &'s SelectionState,
    route_count: usize,
    resolution: &'s Resolution<'a>,
}

/// One summary line per route, tab separated:
/// label, color, distance, point count
pub fn summary_line(route: &ResolvedRoute<'_>) -> String {
    format!(
        "{}\t{}\t{:.0} km\t{} points",
        route.label(),
        route.color(),
        route.distance_km(),
        route.path().len()
    )
}

pub fn write_summary<W: Write>(out: &mut W, resolution: &Resolution<'_>) -> std::io::Result<()> {
    for route in resolution {
        writeln!(out, "{}", summary_line(route))?;
    }
    writeln!(
        out,
        "{} routes, {} airports",
        resolution.len(),
        resolution.endpoints().len()
    )
}

pub fn write_json<W: Write>(
    out: &mut W,
    state: &SelectionState,
    resolution: &Resolution<'_>,
) -> serde_json::Result<()> {
    let document = JsonOutput {
        state,
        route_count: resolution.len(),
        resolution,
    };
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out).map_err(serde_json::Error::io)
}
