//! Airport catalog loading and lookup.
//!
//! Airports are read from headerless rows in the OpenFlights `airports.dat`
//! layout. Only the fields needed for routing are kept: name, city, country,
//! code, and coordinates. Rows whose code is the `\N` sentinel are skipped.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::GeoPosition;

/// Field value marking an airport without a usable code.
pub const UNKNOWN_CODE_SENTINEL: &str = "\\N";

const TABLE: &str = "airports";
const NAME_FIELD: usize = 1;
const CITY_FIELD: usize = 2;
const COUNTRY_FIELD: usize = 3;
const CODE_FIELD: usize = 4;
const LATITUDE_FIELD: usize = 6;
const LONGITUDE_FIELD: usize = 7;
const MIN_FIELDS: usize = LONGITUDE_FIELD + 1;

/// Similarity threshold for "did you mean" city suggestions.
const FUZZY_THRESHOLD: f64 = 0.8;

/// Short airport identifier such as an IATA code.
pub type AirportCode = String;

/// A city within a country, as written in the airport table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Place {
    pub city: String,
    pub country: String,
}

impl Place {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

impl FromStr for Place {
    type Err = Error;

    /// Parse `City, Country`, splitting at the first comma.
    fn from_str(value: &str) -> Result<Self> {
        let (city, country) = value.split_once(',').ok_or_else(|| Error::InvalidQuery {
            message: format!("expected 'City, Country' but got '{}'", value.trim()),
        })?;
        let (city, country) = (city.trim(), country.trim());
        if city.is_empty() || country.is_empty() {
            return Err(Error::InvalidQuery {
                message: format!("city and country must not be empty in '{}'", value.trim()),
            });
        }
        Ok(Place::new(city, country))
    }
}

/// A single airport row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub code: AirportCode,
    pub name: String,
    pub city: String,
    pub country: String,
    pub position: GeoPosition,
}

impl Airport {
    /// The city/country pair this airport serves.
    pub fn place(&self) -> Place {
        Place::new(self.city.clone(), self.country.clone())
    }
}

/// Collection of airports keyed by code, with a city/country index.
#[derive(Debug, Clone, Default)]
pub struct AirportCatalog {
    airports: HashMap<AirportCode, Airport>,
    by_place: BTreeMap<Place, BTreeSet<AirportCode>>,
}

impl AirportCatalog {
    /// Build a catalog from already-parsed airports.
    ///
    /// The first airport seen for a code wins; later duplicates are logged and
    /// dropped so lookups by code stay unambiguous.
    pub fn from_airports(airports: impl IntoIterator<Item = Airport>) -> Self {
        let mut catalog = Self::default();
        for airport in airports {
            catalog.insert(airport);
        }
        catalog
    }

    /// Load a catalog from an `airports.dat` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::TableNotFound {
                table: TABLE,
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        debug!(path = %path.display(), airports = catalog.len(), "loaded airport catalog");
        Ok(catalog)
    }

    /// Load a catalog from headerless CSV rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::Fields)
            .from_reader(reader);

        let mut catalog = Self::default();
        let mut skipped: usize = 0;
        for result in csv_reader.records() {
            let record = result?;
            match parse_airport_row(&record)? {
                Some(airport) => catalog.insert(airport),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!(skipped, "skipped airports without a code");
        }
        Ok(catalog)
    }

    fn insert(&mut self, airport: Airport) {
        if let Some(existing) = self.airports.get(&airport.code) {
            warn!(
                code = %airport.code,
                kept = %existing.name,
                dropped = %airport.name,
                "duplicate airport code; keeping the first occurrence"
            );
            return;
        }
        self.by_place
            .entry(airport.place())
            .or_default()
            .insert(airport.code.clone());
        self.airports.insert(airport.code.clone(), airport);
    }

    /// Number of airports in the catalog.
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Lookup an airport by its exact code.
    pub fn get(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    /// Coordinates of an airport, if the code is known.
    pub fn position(&self, code: &str) -> Option<GeoPosition> {
        self.get(code).map(|airport| airport.position)
    }

    /// All codes serving a city/country pair, in ascending order.
    pub fn codes_for(&self, place: &Place) -> Vec<AirportCode> {
        self.by_place
            .get(place)
            .map(|codes| codes.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Airports serving a city/country pair, ordered by code.
    pub fn airports_in(&self, place: &Place) -> Vec<&Airport> {
        self.by_place
            .get(place)
            .map(|codes| codes.iter().filter_map(|code| self.get(code)).collect())
            .unwrap_or_default()
    }

    /// Find known places whose `City, Country` spelling resembles `place`.
    ///
    /// Comparison is case-insensitive Jaro-Winkler similarity; the best
    /// `limit` matches above the threshold are returned, closest first.
    pub fn fuzzy_city_matches(&self, place: &Place, limit: usize) -> Vec<String> {
        let wanted = place.to_string().to_lowercase();
        let mut scored: Vec<(f64, String)> = self
            .by_place
            .keys()
            .map(|candidate| {
                let label = candidate.to_string();
                (strsim::jaro_winkler(&wanted, &label.to_lowercase()), label)
            })
            .filter(|(score, _)| *score >= FUZZY_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored.truncate(limit);
        scored.into_iter().map(|(_, label)| label).collect()
    }
}

fn parse_airport_row(record: &StringRecord) -> Result<Option<Airport>> {
    let line = record.position().map(|pos| pos.line()).unwrap_or_default();
    if record.len() < MIN_FIELDS {
        return Err(Error::MalformedRow {
            table: TABLE,
            line,
            message: format!("expected at least {MIN_FIELDS} fields, found {}", record.len()),
        });
    }

    let field = |index: usize| record.get(index).unwrap_or_default();
    let code = field(CODE_FIELD);
    if code == UNKNOWN_CODE_SENTINEL || code.is_empty() {
        return Ok(None);
    }

    let coordinate = |index: usize, label: &str| -> Result<f64> {
        field(index).parse::<f64>().map_err(|err| Error::MalformedRow {
            table: TABLE,
            line,
            message: format!("invalid {label} '{}' for airport {code}: {err}", field(index)),
        })
    };

    Ok(Some(Airport {
        code: code.to_string(),
        name: field(NAME_FIELD).to_string(),
        city: field(CITY_FIELD).to_string(),
        country: field(COUNTRY_FIELD).to_string(),
        position: GeoPosition::new(
            coordinate(LATITUDE_FIELD, "latitude")?,
            coordinate(LONGITUDE_FIELD, "longitude")?,
        ),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"1,"Kotoka International Airport","Accra","Ghana","ACC","DGAA",5.605189800262451,-0.16678600013256073,205,0,"N","Africa/Accra","airport","OurAirports"
2,"Some Airstrip","Accra","Ghana","\N","DGXX",5.6,-0.1,10,0,"N","Africa/Accra","airport","OurAirports"
3,"Heathrow","London","United Kingdom","LHR","EGLL",51.4706,-0.461941,83,0,"E","Europe/London","airport","OurAirports"
4,"Gatwick","London","United Kingdom","LGW","EGKK",51.148102,-0.190278,202,0,"E","Europe/London","airport","OurAirports"
"#;

    #[test]
    fn skips_unknown_code_sentinel() {
        let catalog = AirportCatalog::from_reader(SAMPLE.as_bytes()).expect("sample parses");
        assert_eq!(catalog.len(), 3);
        assert!(catalog.get("\\N").is_none());
    }

    #[test]
    fn quoted_fields_are_unwrapped() {
        let catalog = AirportCatalog::from_reader(SAMPLE.as_bytes()).expect("sample parses");
        let acc = catalog.get("ACC").expect("ACC present");
        assert_eq!(acc.name, "Kotoka International Airport");
        assert_eq!(acc.city, "Accra");
        assert!((acc.position.latitude - 5.6051898).abs() < 1e-6);
    }

    #[test]
    fn city_lookup_returns_every_code_sorted() {
        let catalog = AirportCatalog::from_reader(SAMPLE.as_bytes()).expect("sample parses");
        let codes = catalog.codes_for(&Place::new("London", "United Kingdom"));
        assert_eq!(codes, vec!["LGW".to_string(), "LHR".to_string()]);
        assert!(catalog.codes_for(&Place::new("London", "Canada")).is_empty());
    }

    #[test]
    fn short_row_is_rejected_with_line_number() {
        let csv = "1,\"Heathrow\",\"London\",\"United Kingdom\",\"LHR\"\n";
        let err = AirportCatalog::from_reader(csv.as_bytes()).expect_err("short row");
        match err {
            Error::MalformedRow { table, line, .. } => {
                assert_eq!(table, "airports");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_latitude_is_rejected() {
        let csv = "1,\"X\",\"Y\",\"Z\",\"XYZ\",\"XXXX\",north,0.0\n";
        let err = AirportCatalog::from_reader(csv.as_bytes()).expect_err("bad latitude");
        assert!(err.to_string().contains("invalid latitude 'north'"));
    }

    #[test]
    fn duplicate_code_keeps_first_occurrence() {
        let csv = "1,\"First\",\"A\",\"B\",\"DUP\",\"-\",1.0,2.0\n\
                   2,\"Second\",\"C\",\"D\",\"DUP\",\"-\",3.0,4.0\n";
        let catalog = AirportCatalog::from_reader(csv.as_bytes()).expect("parses");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("DUP").map(|a| a.name.as_str()), Some("First"));
        assert!(catalog.codes_for(&Place::new("C", "D")).is_empty());
    }

    #[test]
    fn empty_table_yields_empty_catalog() {
        let catalog = AirportCatalog::from_reader("".as_bytes()).expect("empty parses");
        assert!(catalog.is_empty());
    }

    #[test]
    fn fuzzy_matches_suggest_close_spellings() {
        let catalog = AirportCatalog::from_reader(SAMPLE.as_bytes()).expect("sample parses");
        let matches = catalog.fuzzy_city_matches(&Place::new("Acra", "Ghana"), 3);
        assert_eq!(matches.first().map(String::as_str), Some("Accra, Ghana"));
    }

    #[test]
    fn place_parses_city_and_country() {
        let place: Place = "Accra, Ghana".parse().expect("valid place");
        assert_eq!(place, Place::new("Accra", "Ghana"));
        assert!("Accra".parse::<Place>().is_err());
        assert!(" , Ghana".parse::<Place>().is_err());
    }

    #[test]
    fn place_splits_at_first_comma_without_requiring_a_space() {
        let place: Place = "Accra,Ghana".parse().expect("valid place");
        assert_eq!(place, Place::new("Accra", "Ghana"));
        let place: Place = "Washington, D.C., United States"
            .parse()
            .expect("valid place");
        assert_eq!(place, Place::new("Washington", "D.C., United States"));
    }
}
