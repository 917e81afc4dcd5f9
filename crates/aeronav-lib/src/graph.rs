//! Route graph built from OpenFlights `routes.dat` rows.
//!
//! The graph keeps two append-only views of the route table:
//!
//! - `reachable`: source code to destination codes, in row order, duplicates
//!   kept. This is what the breadth-first search walks.
//! - the airline index: (airline, source, stops) to destination codes. It is
//!   only consulted when annotating a finished route for display.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::debug;

use crate::airports::AirportCode;
use crate::error::{Error, Result};

const TABLE: &str = "routes";
const AIRLINE_FIELD: usize = 0;
const SOURCE_FIELD: usize = 2;
const DESTINATION_FIELD: usize = 4;
const STOPS_FIELD: usize = 7;
const MIN_FIELDS: usize = STOPS_FIELD + 1;

/// One row of the route table, reduced to the fields used for routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub airline: String,
    pub source: AirportCode,
    pub destination: AirportCode,
    pub stops: u32,
}

impl RouteRecord {
    pub fn new(
        airline: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        stops: u32,
    ) -> Self {
        Self {
            airline: airline.into(),
            source: source.into(),
            destination: destination.into(),
            stops,
        }
    }
}

/// Key of the airline index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AirlineKey {
    pub airline: String,
    pub source: AirportCode,
    pub stops: u32,
}

/// Airline and stop count for one hop of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HopService {
    pub airline: String,
    pub stops: u32,
}

/// Directed, unweighted route graph.
///
/// Both maps sit behind `Arc` so a loaded graph can be cloned cheaply and
/// shared read-only between searches.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    reachable: Arc<HashMap<AirportCode, Vec<AirportCode>>>,
    airline_index: Arc<BTreeMap<AirlineKey, Vec<AirportCode>>>,
    route_count: usize,
}

impl RouteGraph {
    /// Build the graph by scanning route records once, in order.
    pub fn from_records(records: impl IntoIterator<Item = RouteRecord>) -> Self {
        let mut reachable: HashMap<AirportCode, Vec<AirportCode>> = HashMap::new();
        let mut airline_index: BTreeMap<AirlineKey, Vec<AirportCode>> = BTreeMap::new();
        let mut route_count = 0;

        for record in records {
            reachable
                .entry(record.source.clone())
                .or_default()
                .push(record.destination.clone());
            airline_index
                .entry(AirlineKey {
                    airline: record.airline,
                    source: record.source,
                    stops: record.stops,
                })
                .or_default()
                .push(record.destination);
            route_count += 1;
        }

        Self {
            reachable: Arc::new(reachable),
            airline_index: Arc::new(airline_index),
            route_count,
        }
    }

    /// Load the graph from a `routes.dat` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::TableNotFound {
                table: TABLE,
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path)?;
        let graph = Self::from_reader(file)?;
        debug!(
            path = %path.display(),
            routes = graph.route_count(),
            sources = graph.source_count(),
            "loaded route graph"
        );
        Ok(graph)
    }

    /// Load the graph from headerless CSV rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::Fields)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.records() {
            records.push(parse_route_row(&result?)?);
        }
        Ok(Self::from_records(records))
    }

    /// Successors of `code`, or `None` when the code never appears as a source.
    ///
    /// The distinction matters to the search: an absent entry is a dead end,
    /// while an empty slice cannot occur because lists are created on first use.
    pub fn successors(&self, code: &str) -> Option<&[AirportCode]> {
        self.reachable.get(code).map(Vec::as_slice)
    }

    /// Whether `from -> to` is a direct route.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.successors(from)
            .is_some_and(|targets| targets.iter().any(|target| target == to))
    }

    /// Number of route rows the graph was built from.
    pub fn route_count(&self) -> usize {
        self.route_count
    }

    /// Number of distinct source codes.
    pub fn source_count(&self) -> usize {
        self.reachable.len()
    }

    /// Destinations served by one airline from one source with a given stop count.
    pub fn airline_destinations(&self, key: &AirlineKey) -> &[AirportCode] {
        self.airline_index
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First service (in airline index order) flying `from -> to`.
    pub fn service_for(&self, from: &str, to: &str) -> Option<HopService> {
        self.airline_index
            .iter()
            .find(|(key, destinations)| {
                key.source == from && destinations.iter().any(|dest| dest == to)
            })
            .map(|(key, _)| HopService {
                airline: key.airline.clone(),
                stops: key.stops,
            })
    }
}

fn parse_route_row(record: &StringRecord) -> Result<RouteRecord> {
    let line = record.position().map(|pos| pos.line()).unwrap_or_default();
    if record.len() < MIN_FIELDS {
        return Err(Error::MalformedRow {
            table: TABLE,
            line,
            message: format!("expected at least {MIN_FIELDS} fields, found {}", record.len()),
        });
    }

    let field = |index: usize| record.get(index).unwrap_or_default();
    let stops = field(STOPS_FIELD)
        .parse::<u32>()
        .map_err(|err| Error::MalformedRow {
            table: TABLE,
            line,
            message: format!("invalid stop count '{}': {err}", field(STOPS_FIELD)),
        })?;

    Ok(RouteRecord::new(
        field(AIRLINE_FIELD),
        field(SOURCE_FIELD),
        field(DESTINATION_FIELD),
        stops,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "ET,3,ACC,1,ADD,2,,0,763\n\
                          KQ,4,ACC,1,NBO,3,,0,738\n\
                          ET,3,ADD,2,CTU,5,,0,788\n\
                          ET,3,ACC,1,ADD,2,Y,0,763\n\
                          3U,9,ADD,2,CTU,5,,1,330\n";

    #[test]
    fn successors_keep_row_order_and_duplicates() {
        let graph = RouteGraph::from_reader(SAMPLE.as_bytes()).expect("sample parses");
        assert_eq!(
            graph.successors("ACC"),
            Some(&["ADD".to_string(), "NBO".to_string(), "ADD".to_string()][..])
        );
        assert_eq!(graph.route_count(), 5);
        assert_eq!(graph.source_count(), 2);
    }

    #[test]
    fn destination_only_codes_have_no_entry() {
        let graph = RouteGraph::from_reader(SAMPLE.as_bytes()).expect("sample parses");
        assert!(graph.successors("CTU").is_none());
        assert!(graph.successors("NBO").is_none());
    }

    #[test]
    fn airline_index_groups_by_airline_source_and_stops() {
        let graph = RouteGraph::from_reader(SAMPLE.as_bytes()).expect("sample parses");
        let key = AirlineKey {
            airline: "ET".to_string(),
            source: "ACC".to_string(),
            stops: 0,
        };
        assert_eq!(
            graph.airline_destinations(&key),
            &["ADD".to_string(), "ADD".to_string()]
        );
    }

    #[test]
    fn service_lookup_prefers_key_order() {
        let graph = RouteGraph::from_reader(SAMPLE.as_bytes()).expect("sample parses");
        // "3U" sorts before "ET", so the one-stop service is reported first.
        assert_eq!(
            graph.service_for("ADD", "CTU"),
            Some(HopService {
                airline: "3U".to_string(),
                stops: 1
            })
        );
        assert_eq!(graph.service_for("ACC", "CTU"), None);
    }

    #[test]
    fn non_numeric_stops_are_rejected() {
        let csv = "ET,3,ACC,1,ADD,2,,many,763\n";
        let err = RouteGraph::from_reader(csv.as_bytes()).expect_err("bad stops");
        assert!(err.to_string().contains("invalid stop count 'many'"));
    }

    #[test]
    fn short_row_is_rejected() {
        let csv = "ET,3,ACC,1,ADD\n";
        let err = RouteGraph::from_reader(csv.as_bytes()).expect_err("short row");
        assert!(matches!(err, Error::MalformedRow { table: "routes", line: 1, .. }));
    }

    #[test]
    fn empty_table_yields_empty_graph() {
        let graph = RouteGraph::from_reader("".as_bytes()).expect("empty parses");
        assert_eq!(graph.route_count(), 0);
        assert!(graph.successors("ACC").is_none());
    }
}
