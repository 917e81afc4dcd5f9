//! Airport lookup by city and country.

use anyhow::{bail, Context, Result};
use clap::Args;

use aeronav_cli::output::{render_airports, render_airports_json, OutputFormat};
use aeronav_cli::terminal::ColorPalette;
use aeronav_lib::Place;

use super::DatasetSource;

const MAX_SUGGESTIONS: usize = 3;

/// Arguments for the airports command.
#[derive(Args, Debug, Clone)]
pub struct AirportsArgs {
    /// City name as written in the airport table.
    #[arg(long)]
    pub city: String,
    /// Country name as written in the airport table.
    #[arg(long)]
    pub country: String,
}

/// List the airports serving a city.
pub fn handle_airports_command(
    source: DatasetSource<'_>,
    args: &AirportsArgs,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let dataset = source.load()?;
    let place = Place::new(args.city.trim(), args.country.trim());
    let airports = dataset.catalog.airports_in(&place);

    if airports.is_empty() {
        let suggestions = dataset.catalog.fuzzy_city_matches(&place, MAX_SUGGESTIONS);
        if suggestions.is_empty() {
            bail!("no airports serve {place}");
        }
        bail!(
            "no airports serve {place}. Did you mean: {}?",
            suggestions.join("; ")
        );
    }

    match format {
        OutputFormat::Text => print!("{}", render_airports(&place, &airports, palette)),
        OutputFormat::Json => println!(
            "{}",
            render_airports_json(&place, &airports).context("failed to serialize airports")?
        ),
    }
    Ok(())
}
