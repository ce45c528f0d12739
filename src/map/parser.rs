//! Map file parsing and validation
//!
//! A map file has a `stations:` section with `name,x,y` lines followed by a
//! `connections:` section with `a-b` lines. `#` starts a comment and spaces
//! are ignored.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

use crate::simulation::{RailNetwork, Station};

/// Maximum number of stations a map may declare
pub const MAX_STATIONS: usize = 10_000;

static STATION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("station name pattern is valid"));

/// Why a map file was rejected. Line numbers are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("the map does not contain a \"stations:\" section")]
    MissingStations,
    #[error("the map does not contain a \"connections:\" section")]
    MissingConnections,
    #[error("the map contains more than {max} stations (line {line})", max = MAX_STATIONS)]
    TooManyStations { line: usize },
    #[error("invalid station format {text:?} on line {line}")]
    InvalidStationFormat { line: usize, text: String },
    #[error("invalid station name {name:?} on line {line}")]
    InvalidStationName { line: usize, name: String },
    #[error("invalid coordinates in {text:?} on line {line}: coordinates must be non-negative integers")]
    InvalidCoordinates { line: usize, text: String },
    #[error("duplicate station {name:?} on line {line}")]
    DuplicateStation { line: usize, name: String },
    #[error("stations {name:?} and {existing:?} share coordinates ({x}, {y}) on line {line}")]
    DuplicateCoordinates {
        line: usize,
        name: String,
        existing: String,
        x: u64,
        y: u64,
    },
    #[error("invalid connection format {text:?} on line {line}")]
    InvalidConnectionFormat { line: usize, text: String },
    #[error("unknown station {name:?} in connection {connection:?} on line {line}")]
    UnknownStation {
        line: usize,
        name: String,
        connection: String,
    },
    #[error("duplicate connection between {a:?} and {b:?} on line {line}")]
    DuplicateConnection { line: usize, a: String, b: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Stations,
    Connections,
}

/// Read and parse a map file
pub fn load_map(path: &Path) -> Result<RailNetwork> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot open map file {}", path.display()))?;
    let network = parse_map(&text).with_context(|| format!("invalid map {}", path.display()))?;
    Ok(network)
}

/// Parse map text into a validated network
pub fn parse_map(text: &str) -> Result<RailNetwork, MapError> {
    let lines: Vec<String> = text.lines().map(clean_line).collect();

    if !lines.iter().any(|line| line == "stations:") {
        return Err(MapError::MissingStations);
    }
    if !lines.iter().any(|line| line == "connections:") {
        return Err(MapError::MissingConnections);
    }

    let mut network = RailNetwork::new();
    let mut coordinates: HashMap<(u64, u64), String> = HashMap::new();
    let mut section = Section::Preamble;

    for (i, line) in lines.iter().enumerate() {
        let line_number = i + 1;
        match line.as_str() {
            "" => continue,
            "stations:" => {
                section = Section::Stations;
                continue;
            }
            "connections:" => {
                section = Section::Connections;
                continue;
            }
            _ => {}
        }

        match section {
            Section::Preamble => {}
            Section::Stations => {
                if network.station_count() >= MAX_STATIONS {
                    return Err(MapError::TooManyStations { line: line_number });
                }
                let station = parse_station(line, line_number)?;
                if network.contains(&station.name) {
                    return Err(MapError::DuplicateStation {
                        line: line_number,
                        name: station.name,
                    });
                }
                if let Some(existing) = coordinates.get(&(station.x, station.y)) {
                    return Err(MapError::DuplicateCoordinates {
                        line: line_number,
                        name: station.name,
                        existing: existing.clone(),
                        x: station.x,
                        y: station.y,
                    });
                }
                coordinates.insert((station.x, station.y), station.name.clone());
                network.add_station(station);
            }
            Section::Connections => parse_connection(&mut network, line, line_number)?,
        }
    }

    Ok(network)
}

/// Strip comments and spaces
fn clean_line(line: &str) -> String {
    let without_comment = line.split('#').next().unwrap_or_default();
    without_comment
        .chars()
        .filter(|c| *c != ' ')
        .collect::<String>()
        .trim()
        .to_owned()
}

fn parse_station(line: &str, line_number: usize) -> Result<Station, MapError> {
    let parts: Vec<&str> = line.split(',').collect();
    let [name, x, y] = parts[..] else {
        return Err(MapError::InvalidStationFormat {
            line: line_number,
            text: line.to_owned(),
        });
    };

    if !STATION_NAME.is_match(name) {
        return Err(MapError::InvalidStationName {
            line: line_number,
            name: name.to_owned(),
        });
    }

    match (x.parse::<u64>(), y.parse::<u64>()) {
        (Ok(x), Ok(y)) => Ok(Station::new(name, x, y)),
        _ => Err(MapError::InvalidCoordinates {
            line: line_number,
            text: line.to_owned(),
        }),
    }
}

fn parse_connection(
    network: &mut RailNetwork,
    line: &str,
    line_number: usize,
) -> Result<(), MapError> {
    let parts: Vec<&str> = line.split('-').collect();
    let [a, b] = parts[..] else {
        return Err(MapError::InvalidConnectionFormat {
            line: line_number,
            text: line.to_owned(),
        });
    };

    let unknown = |name: &str| MapError::UnknownStation {
        line: line_number,
        name: name.to_owned(),
        connection: line.to_owned(),
    };
    let a_node = network.node(a).ok_or_else(|| unknown(a))?;
    let b_node = network.node(b).ok_or_else(|| unknown(b))?;

    if !network.connect_nodes(a_node, b_node) {
        return Err(MapError::DuplicateConnection {
            line: line_number,
            a: a.to_owned(),
            b: b.to_owned(),
        });
    }

    Ok(())
}
