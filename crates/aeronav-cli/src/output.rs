//! Output formatting for flight plans and airport listings.

use std::fmt::Write as _;

use aeronav_lib::{Airport, FlightPlan, Place, RoutePlan};
use clap::ValueEnum;
use serde::Serialize;

use crate::terminal::{format_with_separators, ColorPalette};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable flight plan.
    #[default]
    Text,
    /// Pretty-printed JSON including candidate diagnostics.
    Json,
}

/// Render a flight plan for the terminal.
///
/// With a plain palette the result matches the report written by `--output`,
/// followed by a rounded distance summary.
pub fn render_flight_plan(report: &FlightPlan, palette: &ColorPalette) -> String {
    let ColorPalette {
        reset,
        white_bold,
        gray,
        cyan,
        green,
    } = *palette;

    let mut buffer = String::new();
    let _ = writeln!(buffer, "{white_bold} >> Flight Plan <<{reset}");
    let _ = writeln!(buffer);
    let _ = writeln!(buffer, "{} -> {}", report.origin, report.destination);
    for leg in &report.legs {
        match (&leg.airline, leg.stops) {
            (Some(airline), Some(stops)) => {
                let _ = writeln!(
                    buffer,
                    "     {}. flight {cyan}{}{reset} from {white_bold}{}{reset} to {white_bold}{}{reset} {} stops",
                    leg.index, airline, leg.from, leg.to, stops
                );
            }
            _ => {
                let _ = writeln!(
                    buffer,
                    "     {}. flight {gray}(unknown airline){reset} from {white_bold}{}{reset} to {white_bold}{}{reset}",
                    leg.index, leg.from, leg.to
                );
            }
        }
    }
    let _ = writeln!(buffer, "{green}Total Flights: {}{reset}", report.total_flights);
    let _ = writeln!(
        buffer,
        "{green}Total Additional Stops: {}{reset}",
        report.total_stops
    );
    let _ = writeln!(
        buffer,
        "{green}Total Distance: {:.2} km{reset}",
        report.total_distance_km
    );
    let _ = writeln!(
        buffer,
        "{gray}(about {} km flown){reset}",
        format_with_separators(report.total_distance_km.round() as u64)
    );
    buffer
}

#[derive(Serialize)]
struct RouteDocument<'a> {
    flight_plan: &'a FlightPlan,
    route: &'a [String],
    options: aeronav_lib::SearchOptions,
    candidates: &'a [aeronav_lib::CandidateOutcome],
}

/// Render the flight plan and every evaluated candidate as JSON.
pub fn render_route_json(plan: &RoutePlan, report: &FlightPlan) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&RouteDocument {
        flight_plan: report,
        route: &plan.steps,
        options: plan.options,
        candidates: &plan.candidates,
    })
}

/// Render the airports serving a place.
pub fn render_airports(place: &Place, airports: &[&Airport], palette: &ColorPalette) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{}Airports serving {}{} ({})",
        palette.white_bold,
        place,
        palette.reset,
        airports.len()
    );
    for airport in airports {
        let _ = writeln!(
            buffer,
            " - {}{}{} {} {}({:.4}, {:.4}){}",
            palette.cyan,
            airport.code,
            palette.reset,
            airport.name,
            palette.gray,
            airport.position.latitude,
            airport.position.longitude,
            palette.reset
        );
    }
    buffer
}

#[derive(Serialize)]
struct AirportListing<'a> {
    place: &'a Place,
    airports: &'a [&'a Airport],
}

/// Render the airports serving a place as JSON.
pub fn render_airports_json(place: &Place, airports: &[&Airport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&AirportListing { place, airports })
}
