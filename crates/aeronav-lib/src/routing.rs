//! City-to-city route planning.
//!
//! This module ties the catalog, the route graph and the ranker together:
//!
//! - [`RouteRequest`] - origin/destination places plus search options
//! - [`RoutePlan`] - the selected route and every candidate that was tried
//! - [`plan_route`] - main entry point for computing routes
//!
//! # Example
//!
//! ```no_run
//! use aeronav_lib::{load_dataset, plan_route, DatasetPaths, Place, RouteRequest};
//!
//! let paths = DatasetPaths::in_dir(std::path::Path::new("data"));
//! let dataset = load_dataset(&paths)?;
//! let request = RouteRequest::new(Place::new("Accra", "Ghana"), Place::new("Chengdu", "China"));
//! let plan = plan_route(&dataset.catalog, &dataset.graph, &request)?;
//! println!("Route: {} flights", plan.hop_count());
//! # Ok::<(), aeronav_lib::Error>(())
//! ```

use serde::Serialize;
use tracing::info;

use crate::airports::{AirportCatalog, AirportCode, Place};
use crate::error::{Error, NoRouteReason, Result};
use crate::graph::RouteGraph;
use crate::query::TravelQuery;
use crate::ranking::{CandidateOutcome, PathRanker, SearchOptions};

/// Number of "did you mean" suggestions attached to unresolved places.
const MAX_SUGGESTIONS: usize = 3;

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin: Place,
    pub destination: Place,
    pub options: SearchOptions,
}

impl RouteRequest {
    /// Request with default search options.
    pub fn new(origin: Place, destination: Place) -> Self {
        Self {
            origin,
            destination,
            options: SearchOptions::default(),
        }
    }

    /// Replace the search options.
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }
}

impl From<TravelQuery> for RouteRequest {
    fn from(query: TravelQuery) -> Self {
        Self::new(query.origin, query.destination)
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub origin: Place,
    pub destination: Place,
    pub options: SearchOptions,
    pub steps: Vec<AirportCode>,
    pub total_distance_km: f64,
    pub candidates: Vec<CandidateOutcome>,
}

impl RoutePlan {
    /// Number of flights in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Compute the shortest-distance route among all candidate airport pairs.
pub fn plan_route(
    catalog: &AirportCatalog,
    graph: &RouteGraph,
    request: &RouteRequest,
) -> Result<RoutePlan> {
    let not_found = |reason| Error::RouteNotFound {
        origin: request.origin.to_string(),
        destination: request.destination.to_string(),
        reason,
    };

    let starts = catalog.codes_for(&request.origin);
    if starts.is_empty() {
        return Err(not_found(NoRouteReason::NoOriginAirports {
            suggestions: catalog.fuzzy_city_matches(&request.origin, MAX_SUGGESTIONS),
        }));
    }
    let goals = catalog.codes_for(&request.destination);
    if goals.is_empty() {
        return Err(not_found(NoRouteReason::NoDestinationAirports {
            suggestions: catalog.fuzzy_city_matches(&request.destination, MAX_SUGGESTIONS),
        }));
    }

    let ranker = PathRanker::new(catalog, graph, request.options);
    let Some(ranked) = ranker.rank(&starts, &goals) else {
        return Err(not_found(NoRouteReason::AllCandidatesFailed {
            attempted: ranker.candidate_pairs(&starts, &goals).len(),
        }));
    };

    info!(
        origin = %request.origin,
        destination = %request.destination,
        route = %ranked.best.path.join(" -> "),
        distance_km = ranked.best.total_distance_km,
        candidates = ranked.candidates.len(),
        "selected route"
    );

    Ok(RoutePlan {
        origin: request.origin.clone(),
        destination: request.destination.clone(),
        options: request.options,
        steps: ranked.best.path,
        total_distance_km: ranked.best.total_distance_km,
        candidates: ranked.candidates,
    })
}
