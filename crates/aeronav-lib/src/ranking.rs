//! Candidate evaluation and distance-based selection.
//!
//! A city can be served by several airports, so a city-to-city request turns
//! into several (start code, goal code) candidates. Each candidate is searched
//! independently; successful paths are scored by summed great-circle distance
//! and the shortest one wins.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, warn};

use crate::airports::{AirportCatalog, AirportCode};
use crate::error::{Error, Result};
use crate::graph::RouteGraph;
use crate::path::{find_route_bfs, DeadEndPolicy, SearchOutcome};

/// Which goal codes are paired with each start code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalSelection {
    /// Search only towards the last goal code collected (the highest code in
    /// catalog order). Matches the historical behavior.
    #[default]
    Last,
    /// Search towards every goal code.
    All,
}

/// Options shared by every candidate search of one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    pub dead_end_policy: DeadEndPolicy,
    pub goal_selection: GoalSelection,
}

/// A searched path together with its total great-circle length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPath {
    pub path: Vec<AirportCode>,
    pub total_distance_km: f64,
}

impl ScoredPath {
    /// Number of flights in the path.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// How a single candidate pair ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CandidateStatus {
    Scored(ScoredPath),
    DeadEnd { airport: AirportCode },
    Exhausted,
    UnknownCode { code: AirportCode },
}

/// Outcome of searching one (start, goal) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateOutcome {
    pub start: AirportCode,
    pub goal: AirportCode,
    #[serde(flatten)]
    pub status: CandidateStatus,
}

impl CandidateOutcome {
    fn scored(&self) -> Option<&ScoredPath> {
        match &self.status {
            CandidateStatus::Scored(scored) => Some(scored),
            _ => None,
        }
    }
}

/// The winning path plus every candidate that was evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRoute {
    pub best: ScoredPath,
    pub candidates: Vec<CandidateOutcome>,
}

/// Runs the route finder over candidate pairs and ranks the results.
#[derive(Debug, Clone, Copy)]
pub struct PathRanker<'a> {
    catalog: &'a AirportCatalog,
    graph: &'a RouteGraph,
    options: SearchOptions,
}

impl<'a> PathRanker<'a> {
    pub fn new(catalog: &'a AirportCatalog, graph: &'a RouteGraph, options: SearchOptions) -> Self {
        Self {
            catalog,
            graph,
            options,
        }
    }

    /// Expand start and goal codes into the candidate pairs to search.
    pub fn candidate_pairs(
        &self,
        starts: &[AirportCode],
        goals: &[AirportCode],
    ) -> Vec<(AirportCode, AirportCode)> {
        let goals: &[AirportCode] = match self.options.goal_selection {
            GoalSelection::Last => goals.last().map(std::slice::from_ref).unwrap_or(&[]),
            GoalSelection::All => goals,
        };
        starts
            .iter()
            .flat_map(|start| goals.iter().map(move |goal| (start.clone(), goal.clone())))
            .collect()
    }

    /// Search and score one candidate pair.
    pub fn evaluate(&self, start: &str, goal: &str) -> CandidateOutcome {
        let status = match find_route_bfs(self.graph, start, goal, self.options.dead_end_policy) {
            SearchOutcome::Found(path) => match self.path_length(&path) {
                Ok(total_distance_km) => CandidateStatus::Scored(ScoredPath {
                    path,
                    total_distance_km,
                }),
                Err(code) => CandidateStatus::UnknownCode { code },
            },
            SearchOutcome::DeadEnd(airport) => CandidateStatus::DeadEnd { airport },
            SearchOutcome::Exhausted => CandidateStatus::Exhausted,
        };

        match &status {
            CandidateStatus::Scored(scored) => debug!(
                start,
                goal,
                hops = scored.hop_count(),
                distance_km = scored.total_distance_km,
                "candidate path scored"
            ),
            CandidateStatus::UnknownCode { code } => warn!(
                start,
                goal,
                code = %code,
                "candidate path references an airport missing from the catalog"
            ),
            CandidateStatus::DeadEnd { airport } => {
                debug!(start, goal, dead_end = %airport, "candidate search hit a dead end")
            }
            CandidateStatus::Exhausted => debug!(start, goal, "candidate search exhausted"),
        }

        CandidateOutcome {
            start: start.to_string(),
            goal: goal.to_string(),
            status,
        }
    }

    /// Sum of great-circle distances between consecutive airports of `path`.
    pub fn score(&self, path: &[AirportCode]) -> Result<f64> {
        self.path_length(path).map_err(|code| Error::UnknownCode { code })
    }

    /// Like [`score`](Self::score), but reports the first unknown code directly.
    fn path_length(&self, path: &[AirportCode]) -> std::result::Result<f64, AirportCode> {
        let positions = path
            .iter()
            .map(|code| self.catalog.position(code).ok_or_else(|| code.clone()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(positions
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum())
    }

    /// Evaluate every candidate pair and pick the shortest scored path.
    ///
    /// Returns `None` when no candidate produced a scored path. Candidates
    /// with equal distance resolve to the one evaluated first.
    pub fn rank(&self, starts: &[AirportCode], goals: &[AirportCode]) -> Option<RankedRoute> {
        let candidates: Vec<CandidateOutcome> = self
            .candidate_pairs(starts, goals)
            .iter()
            .map(|(start, goal)| self.evaluate(start, goal))
            .collect();

        let best = select_shortest(&candidates)?.clone();
        Some(RankedRoute { best, candidates })
    }
}

/// Minimum by (distance, evaluation index).
fn select_shortest(candidates: &[CandidateOutcome]) -> Option<&ScoredPath> {
    candidates
        .iter()
        .enumerate()
        .filter_map(|(index, outcome)| outcome.scored().map(|scored| (index, scored)))
        .min_by(|(ia, a), (ib, b)| compare_scored(a, b).then_with(|| ia.cmp(ib)))
        .map(|(_, scored)| scored)
}

fn compare_scored(a: &ScoredPath, b: &ScoredPath) -> Ordering {
    a.total_distance_km.total_cmp(&b.total_distance_km)
}
