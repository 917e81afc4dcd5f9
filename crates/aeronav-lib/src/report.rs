use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::airports::{AirportCode, Place};
use crate::error::{Error, Result};
use crate::graph::RouteGraph;
use crate::routing::RoutePlan;

/// One flight of a planned route, annotated with the serving airline.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlightLeg {
    pub index: usize,
    pub from: AirportCode,
    pub to: AirportCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<u32>,
}

/// Printable flight plan for a selected route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlightPlan {
    pub origin: Place,
    pub destination: Place,
    pub legs: Vec<FlightLeg>,
    pub total_flights: usize,
    pub total_stops: u32,
    pub total_distance_km: f64,
}

impl FlightPlan {
    /// Annotate every hop of `plan` with airline and stop count from the route graph.
    ///
    /// Hops that no airline index entry covers keep `airline` and `stops` unset
    /// and contribute nothing to the stop total.
    pub fn from_route(plan: &RoutePlan, graph: &RouteGraph) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoute);
        }

        let legs = plan
            .steps
            .windows(2)
            .enumerate()
            .map(|(index, hop)| {
                let service = graph.service_for(&hop[0], &hop[1]);
                FlightLeg {
                    index: index + 1,
                    from: hop[0].clone(),
                    to: hop[1].clone(),
                    airline: service.as_ref().map(|s| s.airline.clone()),
                    stops: service.map(|s| s.stops),
                }
            })
            .collect::<Vec<_>>();

        let total_stops: u32 = legs.iter().filter_map(|leg| leg.stops).sum();
        debug!(legs = legs.len(), total_stops, "built flight plan");

        Ok(Self {
            origin: plan.origin.clone(),
            destination: plan.destination.clone(),
            total_flights: legs.len(),
            total_stops,
            total_distance_km: plan.total_distance_km,
            legs,
        })
    }

    /// Render the plan as the plain-text report.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, " >> Flight Plan <<");
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "{} -> {}", self.origin, self.destination);
        for leg in &self.legs {
            match (&leg.airline, leg.stops) {
                (Some(airline), Some(stops)) => {
                    let _ = writeln!(
                        buffer,
                        "     {}. flight {} from {} to {} {} stops",
                        leg.index, airline, leg.from, leg.to, stops
                    );
                }
                _ => {
                    let _ = writeln!(
                        buffer,
                        "     {}. flight (unknown airline) from {} to {}",
                        leg.index, leg.from, leg.to
                    );
                }
            }
        }
        let _ = writeln!(buffer, "Total Flights: {}", self.total_flights);
        let _ = writeln!(buffer, "Total Additional Stops: {}", self.total_stops);
        let _ = writeln!(buffer, "Total Distance: {:.2} km", self.total_distance_km);
        buffer
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the text report to `path`, replacing any existing file.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render_text())?;
        debug!(path = %path.display(), "wrote flight plan");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RouteRecord;
    use crate::ranking::SearchOptions;

    fn plan(steps: &[&str]) -> RoutePlan {
        RoutePlan {
            origin: Place::new("Accra", "Ghana"),
            destination: Place::new("Chengdu", "China"),
            options: SearchOptions::default(),
            steps: steps.iter().map(|s| s.to_string()).collect(),
            total_distance_km: 11234.5678,
            candidates: Vec::new(),
        }
    }

    fn graph() -> RouteGraph {
        RouteGraph::from_records(vec![
            RouteRecord::new("ET", "ACC", "ADD", 0),
            RouteRecord::new("CA", "ADD", "CTU", 1),
        ])
    }

    #[test]
    fn legs_are_annotated_with_airline_and_stops() {
        let report = FlightPlan::from_route(&plan(&["ACC", "ADD", "CTU"]), &graph()).expect("plan");
        assert_eq!(report.total_flights, 2);
        assert_eq!(report.total_stops, 1);
        assert_eq!(report.legs[1].airline.as_deref(), Some("CA"));
        assert_eq!(report.legs[1].index, 2);
    }

    #[test]
    fn text_report_layout() {
        let report = FlightPlan::from_route(&plan(&["ACC", "ADD", "CTU"]), &graph()).expect("plan");
        let text = report.render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " >> Flight Plan <<");
        assert_eq!(lines[2], "Accra, Ghana -> Chengdu, China");
        assert_eq!(lines[3], "     1. flight ET from ACC to ADD 0 stops");
        assert_eq!(lines[4], "     2. flight CA from ADD to CTU 1 stops");
        assert_eq!(lines[5], "Total Flights: 2");
        assert_eq!(lines[6], "Total Additional Stops: 1");
        assert_eq!(lines[7], "Total Distance: 11234.57 km");
    }

    #[test]
    fn unmatched_hop_has_unknown_airline() {
        let report = FlightPlan::from_route(&plan(&["ACC", "NBO"]), &graph()).expect("plan");
        assert_eq!(report.legs[0].airline, None);
        assert_eq!(report.total_stops, 0);
        assert!(report.render_text().contains("flight (unknown airline) from ACC to NBO"));
    }

    #[test]
    fn single_airport_route_has_no_flights() {
        let report = FlightPlan::from_route(&plan(&["ACC"]), &graph()).expect("plan");
        assert!(report.legs.is_empty());
        assert_eq!(report.total_flights, 0);
    }

    #[test]
    fn empty_route_is_rejected() {
        let err = FlightPlan::from_route(&plan(&[]), &graph()).expect_err("empty");
        assert!(matches!(err, Error::EmptyRoute));
    }

    #[test]
    fn json_skips_unknown_airline() {
        let report = FlightPlan::from_route(&plan(&["ACC", "NBO"]), &graph()).expect("plan");
        let json = report.to_json_pretty().expect("json");
        assert!(json.contains("\"total_flights\": 1"));
        assert!(!json.contains("\"airline\""));
    }

    #[test]
    fn writes_text_report_to_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("plan.txt");
        let report = FlightPlan::from_route(&plan(&["ACC", "ADD"]), &graph()).expect("plan");
        report.write_to_path(&path).expect("write");
        let contents = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(contents, report.render_text());
    }
}
