//! Travel query files.
//!
//! A query file names the origin and the destination on two lines:
//!
//! ```text
//! Accra, Ghana
//! Chengdu, China
//! ```

use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::airports::Place;
use crate::error::{Error, Result};

/// Origin and destination of a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TravelQuery {
    pub origin: Place,
    pub destination: Place,
}

impl TravelQuery {
    pub fn new(origin: Place, destination: Place) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Read a query from a file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Read a query from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        contents.parse()
    }
}

impl FromStr for TravelQuery {
    type Err = Error;

    fn from_str(contents: &str) -> Result<Self> {
        let mut lines = contents.lines().map(str::trim).filter(|line| !line.is_empty());
        let origin = lines.next().ok_or_else(|| Error::InvalidQuery {
            message: "missing origin line".to_string(),
        })?;
        let destination = lines.next().ok_or_else(|| Error::InvalidQuery {
            message: "missing destination line".to_string(),
        })?;
        if lines.next().is_some() {
            return Err(Error::InvalidQuery {
                message: "expected exactly two 'City, Country' lines".to_string(),
            });
        }

        Ok(Self::new(origin.parse()?, destination.parse()?))
    }
}
