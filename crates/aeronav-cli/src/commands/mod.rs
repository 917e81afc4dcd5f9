//! Subcommand handlers. `main.rs` parses arguments and dispatches here.

pub mod airports;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use aeronav_lib::{load_dataset, resolve_dataset, Dataset};

/// Where the airport and route tables come from.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetSource<'a> {
    pub data_dir: Option<&'a Path>,
    pub airports: Option<&'a Path>,
    pub routes: Option<&'a Path>,
}

impl DatasetSource<'_> {
    /// Resolve both table paths and load them.
    pub fn load(&self) -> Result<Dataset> {
        let paths = resolve_dataset(self.data_dir)
            .context("failed to resolve the dataset directory")?
            .with_overrides(self.airports, self.routes);
        debug!(
            airports = %paths.airports.display(),
            routes = %paths.routes.display(),
            "loading dataset"
        );
        load_dataset(&paths).with_context(|| {
            format!(
                "failed to load dataset from {} and {}",
                paths.airports.display(),
                paths.routes.display()
            )
        })
    }
}
