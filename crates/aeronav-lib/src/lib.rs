//! AeroNav library entry points.
//!
//! This crate loads the OpenFlights airport and route tables, builds the route
//! graph, runs breadth-first connection searches and ranks candidate
//! itineraries by great-circle distance. Higher-level consumers (the CLI)
//! should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod airports;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod graph;
pub mod path;
pub mod query;
pub mod ranking;
pub mod report;
pub mod routing;

pub use airports::{Airport, AirportCatalog, AirportCode, Place};
pub use dataset::{default_data_dir, load_dataset, resolve_dataset, Dataset, DatasetPaths};
pub use error::{Error, NoRouteReason, Result};
pub use geo::{haversine_km, GeoPosition};
pub use graph::{RouteGraph, RouteRecord};
pub use path::{find_route, find_route_bfs, DeadEndPolicy, SearchOutcome};
pub use query::TravelQuery;
pub use ranking::{
    CandidateOutcome, CandidateStatus, GoalSelection, PathRanker, RankedRoute, ScoredPath,
    SearchOptions,
};
pub use report::{FlightLeg, FlightPlan};
pub use routing::{plan_route, RoutePlan, RouteRequest};
