//! Route command handler for planning flights between two cities.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use aeronav_cli::output::{render_flight_plan, render_route_json, OutputFormat};
use aeronav_cli::terminal::ColorPalette;
use aeronav_lib::{
    plan_route, DeadEndPolicy, FlightPlan, GoalSelection, Place, RouteRequest, SearchOptions,
    TravelQuery,
};

use super::DatasetSource;

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Origin as "City, Country".
    #[arg(long = "from", required_unless_present = "input", conflicts_with = "input")]
    pub from: Option<Place>,
    /// Destination as "City, Country".
    #[arg(long = "to", required_unless_present = "input", conflicts_with = "input")]
    pub to: Option<Place>,
    /// Query file with the origin and destination on two lines.
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,
    /// Also write the text flight plan to this file.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
    /// Continue the search past airports without outgoing routes.
    #[arg(long)]
    pub skip_dead_ends: bool,
    /// Search every destination airport instead of only the last one.
    #[arg(long)]
    pub all_goals: bool,
}

impl RouteArgs {
    /// Search options selected by the flags.
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            dead_end_policy: if self.skip_dead_ends {
                DeadEndPolicy::Skip
            } else {
                DeadEndPolicy::Abort
            },
            goal_selection: if self.all_goals {
                GoalSelection::All
            } else {
                GoalSelection::Last
            },
        }
    }

    /// Build the travel query from `--input` or `--from`/`--to`.
    pub fn query(&self) -> Result<TravelQuery> {
        if let Some(path) = &self.input {
            return TravelQuery::from_path(path)
                .with_context(|| format!("failed to read travel query from {}", path.display()));
        }
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => Ok(TravelQuery::new(from.clone(), to.clone())),
            _ => bail!("provide --from and --to, or --input"),
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    source: DatasetSource<'_>,
    args: &RouteArgs,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let query = args.query()?;
    let dataset = source.load()?;
    let request = RouteRequest::from(query).with_options(args.options());

    let plan = plan_route(&dataset.catalog, &dataset.graph, &request)?;
    let report = FlightPlan::from_route(&plan, &dataset.graph)?;

    if let Some(path) = &args.output {
        report
            .write_to_path(path)
            .with_context(|| format!("failed to write flight plan to {}", path.display()))?;
    }

    match format {
        OutputFormat::Text => print!("{}", render_flight_plan(&report, palette)),
        OutputFormat::Json => println!(
            "{}",
            render_route_json(&plan, &report).context("failed to serialize route")?
        ),
    }
    Ok(())
}
