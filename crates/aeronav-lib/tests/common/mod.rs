//! Shared fixture helpers for the integration tests.

use std::path::PathBuf;

use aeronav_lib::{load_dataset, Dataset, DatasetPaths};

/// Directory holding the small OpenFlights-format fixture tables.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load the fixture airports and routes.
#[allow(dead_code)]
pub fn fixture_dataset() -> Dataset {
    load_dataset(&DatasetPaths::in_dir(&fixtures_dir())).expect("fixture dataset loads")
}
