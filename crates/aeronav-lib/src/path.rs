use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::airports::AirportCode;
use crate::graph::RouteGraph;

/// What the search does when it dequeues an airport with no outgoing routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadEndPolicy {
    /// Abort the whole search at the first dead end, even when other frontier
    /// entries remain. Matches the historical behavior of the route finder.
    #[default]
    Abort,
    /// Leave the dead end unexpanded and continue with the rest of the frontier.
    Skip,
}

/// Result of a single breadth-first search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The goal was reached; the path runs start to goal inclusive.
    Found(Vec<AirportCode>),
    /// The search aborted at an airport that has no outgoing routes.
    DeadEnd(AirportCode),
    /// The frontier emptied without reaching the goal.
    Exhausted,
}

impl SearchOutcome {
    /// The found path, if any.
    pub fn into_path(self) -> Option<Vec<AirportCode>> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::DeadEnd(_) | SearchOutcome::Exhausted => None,
        }
    }
}

/// Find a route between `start` and `goal` using breadth-first search with the
/// default dead-end policy.
pub fn find_route(graph: &RouteGraph, start: &str, goal: &str) -> Option<Vec<AirportCode>> {
    find_route_bfs(graph, start, goal, DeadEndPolicy::default()).into_path()
}

/// Run breadth-first search from `start` towards `goal`.
///
/// The goal test happens while generating successors: the first time the goal
/// shows up as a successor of the node being expanded, the path is rebuilt and
/// returned before the remaining successors of that node are enqueued.
/// Successors are otherwise enqueued unconditionally, duplicates included.
/// Parents are recorded on first discovery only, so the trace is always a tree
/// rooted at `start`.
pub fn find_route_bfs(
    graph: &RouteGraph,
    start: &str,
    goal: &str,
    policy: DeadEndPolicy,
) -> SearchOutcome {
    if start == goal {
        return SearchOutcome::Found(vec![start.to_string()]);
    }

    let mut trace: HashMap<&str, Option<&str>> = HashMap::new();
    let mut explored: HashSet<&str> = HashSet::new();
    let mut frontier: VecDeque<&str> = VecDeque::new();

    trace.insert(start, None);
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        // Re-expanding an explored node would only re-enqueue successors that
        // are already queued; the trace would not change.
        if !explored.insert(current) {
            continue;
        }

        let Some(successors) = graph.successors(current) else {
            match policy {
                DeadEndPolicy::Abort => return SearchOutcome::DeadEnd(current.to_string()),
                DeadEndPolicy::Skip => continue,
            }
        };

        for child in successors {
            let child = child.as_str();
            trace.entry(child).or_insert(Some(current));
            if child == goal && !explored.contains(child) && !frontier.contains(&child) {
                return SearchOutcome::Found(reconstruct_path(&trace, goal));
            }
            frontier.push_back(child);
        }
    }

    SearchOutcome::Exhausted
}

fn reconstruct_path(trace: &HashMap<&str, Option<&str>>, goal: &str) -> Vec<AirportCode> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node.to_string());
        current = trace.get(node).copied().flatten();
    }
    path.reverse();
    path
}
