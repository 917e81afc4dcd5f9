use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::airports::AirportCatalog;
use crate::error::{Error, Result};
use crate::graph::RouteGraph;

/// Environment variable that overrides the dataset directory.
pub const DATA_DIR_ENV: &str = "AERONAV_DATA_DIR";

/// Accepted file names for the airport table, in lookup order.
const AIRPORT_FILENAMES: [&str; 2] = ["airports.dat", "airports.csv"];
/// Accepted file names for the route table, in lookup order.
const ROUTE_FILENAMES: [&str; 2] = ["routes.dat", "routes.csv"];

/// Locations of the two input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub airports: PathBuf,
    pub routes: PathBuf,
}

impl DatasetPaths {
    /// Tables inside `dir`, preferring `.dat` files and falling back to `.csv`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            airports: pick_table(dir, &AIRPORT_FILENAMES),
            routes: pick_table(dir, &ROUTE_FILENAMES),
        }
    }

    /// Replace individual table paths with explicit overrides.
    pub fn with_overrides(mut self, airports: Option<&Path>, routes: Option<&Path>) -> Self {
        if let Some(path) = airports {
            self.airports = path.to_path_buf();
        }
        if let Some(path) = routes {
            self.routes = path.to_path_buf();
        }
        self
    }
}

fn pick_table(dir: &Path, names: &[&str]) -> PathBuf {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.exists())
        .unwrap_or_else(|| dir.join(names[0]))
}

/// Resolve the default dataset directory using platform-specific project directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "aeronav", "aeronav").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolve where the airport and route tables live.
///
/// The resolution order is:
/// 1. Explicit `data_dir` argument when provided.
/// 2. `AERONAV_DATA_DIR` environment variable.
/// 3. Platform-specific project data directory.
pub fn resolve_dataset(data_dir: Option<&Path>) -> Result<DatasetPaths> {
    let dir = match data_dir {
        Some(explicit) => explicit.to_path_buf(),
        None => match env::var_os(DATA_DIR_ENV) {
            Some(env_path) => PathBuf::from(env_path),
            None => default_data_dir()?,
        },
    };
    debug!(dir = %dir.display(), "resolved dataset directory");
    Ok(DatasetPaths::in_dir(&dir))
}

/// Airport catalog and route graph loaded together.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub catalog: AirportCatalog,
    pub graph: RouteGraph,
}

/// Load both tables.
pub fn load_dataset(paths: &DatasetPaths) -> Result<Dataset> {
    let catalog = AirportCatalog::from_path(&paths.airports)?;
    let graph = RouteGraph::from_path(&paths.routes)?;
    Ok(Dataset { catalog, graph })
}
