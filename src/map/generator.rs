//! Random map generation
//!
//! Produces map files that always pass the parser: unique identifier-safe
//! names, unique coordinates and no duplicate or self connections.

use anyhow::{Context, Result};
use log::{info, warn};
use rand::Rng;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Coordinates are drawn from `0..station_count * COORDINATE_SCALE`
pub const COORDINATE_SCALE: u64 = 20;

/// Number of connections aimed for per station
pub const CONNECTIONS_PER_STATION: usize = 2;

/// Attempts per station when giving each station its first connection
const FIRST_CONNECTION_ATTEMPTS: usize = 3;

/// A generated station with its coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStation {
    pub name: String,
    pub x: u64,
    pub y: u64,
}

/// A randomly generated map
#[derive(Debug, Clone, Default)]
pub struct GeneratedMap {
    pub stations: Vec<GeneratedStation>,
    /// Connections as indices into `stations`
    pub connections: Vec<(usize, usize)>,
}

impl GeneratedMap {
    /// Render in the map file format
    pub fn to_map_string(&self) -> String {
        let mut text = String::from("stations:\n");
        for station in &self.stations {
            text.push_str(&format!("{},{},{}\n", station.name, station.x, station.y));
        }

        text.push_str("\nconnections:\n");
        for (a, b) in &self.connections {
            text.push_str(&format!(
                "{}-{}\n",
                self.stations[*a].name, self.stations[*b].name
            ));
        }
        text
    }
}

/// Read candidate station names, one per line
pub fn read_station_names(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot open station name file {}", path.display()))?;
    Ok(text.lines().map(str::to_owned).collect())
}

/// Generate a map with `station_count` stations.
///
/// Names come from `names` (deduplicated and made identifier-safe), padded
/// with `station{n}` when there are too few.
pub fn generate_map<R: Rng>(
    names: &[String],
    station_count: usize,
    rng: &mut R,
) -> Result<GeneratedMap> {
    if station_count < 2 {
        anyhow::bail!("Invalid number of stations: {station_count} (must be at least 2)");
    }

    let names = station_names(names, station_count);
    let stations = place_stations(names, rng);
    let connections = connect_stations(stations.len(), rng);

    Ok(GeneratedMap {
        stations,
        connections,
    })
}

/// Write a generated map, appending `.map` to the file name if missing.
/// Returns the path actually written.
pub fn write_map_file(path: &Path, map: &GeneratedMap) -> Result<PathBuf> {
    let path = if path.extension().is_some_and(|ext| ext == "map") {
        path.to_path_buf()
    } else {
        let mut with_extension = path.as_os_str().to_owned();
        with_extension.push(".map");
        PathBuf::from(with_extension)
    };

    std::fs::write(&path, map.to_map_string())
        .with_context(|| format!("cannot write map file {}", path.display()))?;

    info!(
        "Wrote {} with {} stations and {} connections",
        path.display(),
        map.stations.len(),
        map.connections.len()
    );
    Ok(path)
}

/// Lower-case a name and replace anything outside `[a-z0-9_]` with `_`
fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn station_names(names: &[String], station_count: usize) -> Vec<String> {
    let mut unique = HashSet::new();
    let mut stations: Vec<String> = names
        .iter()
        .map(|name| sanitize_name(name))
        .filter(|name| !name.is_empty() && unique.insert(name.clone()))
        .take(station_count)
        .collect();

    let mut n = stations.len();
    while stations.len() < station_count {
        n += 1;
        let name = format!("station{n}");
        if unique.insert(name.clone()) {
            stations.push(name);
        }
    }
    stations
}

fn place_stations<R: Rng>(names: Vec<String>, rng: &mut R) -> Vec<GeneratedStation> {
    let bound = names.len() as u64 * COORDINATE_SCALE;
    let mut used = HashSet::new();

    names
        .into_iter()
        .map(|name| loop {
            let (x, y) = (rng.random_range(0..bound), rng.random_range(0..bound));
            if used.insert((x, y)) {
                break GeneratedStation { name, x, y };
            }
        })
        .collect()
}

fn connect_stations<R: Rng>(station_count: usize, rng: &mut R) -> Vec<(usize, usize)> {
    let target = station_count * CONNECTIONS_PER_STATION;
    let max_attempts = target * 10;
    let mut connections = Vec::new();
    let mut seen = HashSet::new();

    let mut try_connect = |a: usize, b: usize, connections: &mut Vec<(usize, usize)>| {
        if a != b && seen.insert((a.min(b), a.max(b))) {
            connections.push((a, b));
            true
        } else {
            false
        }
    };

    // Give every station a chance at one connection first
    for a in 0..station_count {
        if connections.len() >= target {
            break;
        }
        for _ in 0..FIRST_CONNECTION_ATTEMPTS {
            let b = rng.random_range(0..station_count);
            if try_connect(a, b, &mut connections) {
                break;
            }
        }
    }

    let mut attempts = 0;
    while connections.len() < target && attempts < max_attempts {
        let a = rng.random_range(0..station_count);
        let b = rng.random_range(0..station_count);
        try_connect(a, b, &mut connections);
        attempts += 1;
    }

    if connections.len() < target {
        warn!(
            "Generated {} of {target} connections after {max_attempts} attempts",
            connections.len()
        );
    }
    connections
}
