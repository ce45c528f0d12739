//! Route discovery, train assignment and movement simulation
//!
//! This module contains the dispatch core. It works on an already validated
//! [`RailNetwork`] and does no file I/O of its own.

mod dispatcher;
mod occupancy;
mod path_finder;
mod pipeline;
mod rail_network;
mod train;
mod types;
mod world;

pub use dispatcher::{simulate, Dispatcher};
pub use occupancy::StationLocks;
pub use path_finder::find_paths;
pub use pipeline::{assign_to_pipelines, pipeline_loads};
pub use rail_network::{RailNetwork, Station};
pub use train::Train;
pub use types::{EdgeKey, Move, TrainId, TrainState, Turn};
pub use world::{run_dispatch, DispatchReport};
