//! Map files: parsing into a [`RailNetwork`](crate::simulation::RailNetwork)
//! and random generation.

mod generator;
mod parser;

pub use generator::{
    generate_map, read_station_names, write_map_file, GeneratedMap, GeneratedStation,
    CONNECTIONS_PER_STATION, COORDINATE_SCALE,
};
pub use parser::{load_map, parse_map, MapError, MAX_STATIONS};
