use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use aeronav_cli::output::OutputFormat;
use aeronav_cli::terminal::ColorPalette;

mod commands;

use commands::airports::{handle_airports_command, AirportsArgs};
use commands::route::{handle_route_command, RouteArgs};
use commands::DatasetSource;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find flight connections between cities")]
struct Cli {
    /// Directory holding airports.dat and routes.dat.
    #[arg(long, env = "AERONAV_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Explicit path to the airport table.
    #[arg(long = "airports", global = true)]
    airports_file: Option<PathBuf>,

    /// Explicit path to the route table.
    #[arg(long = "routes", global = true)]
    routes_file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable ANSI colors in text output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan the shortest-distance connection between two cities.
    Route(RouteArgs),
    /// List the airports serving a city.
    Airports(AirportsArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source = DatasetSource {
        data_dir: cli.data_dir.as_deref(),
        airports: cli.airports_file.as_deref(),
        routes: cli.routes_file.as_deref(),
    };
    let palette = if cli.no_color {
        ColorPalette::plain()
    } else {
        ColorPalette::detect()
    };

    match &cli.command {
        Command::Route(args) => handle_route_command(source, args, cli.format, &palette),
        Command::Airports(args) => handle_airports_command(source, args, cli.format, &palette),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
