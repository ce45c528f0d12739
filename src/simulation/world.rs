//! Dispatch run that ties everything together
//!
//! This is the entry point for running the core without the command line:
//! route discovery, train assignment and the movement simulation in one call.

use log::info;

use super::dispatcher::simulate;
use super::path_finder::find_paths;
use super::pipeline::{assign_to_pipelines, pipeline_loads};
use super::rail_network::RailNetwork;
use super::train::Train;
use super::types::Turn;

/// Everything produced by one dispatch run
#[derive(Debug, Clone)]
pub struct DispatchReport {
    /// Routes found, shortest first
    pub paths: Vec<Vec<String>>,
    /// Trains in the priority order of the last evaluated turn
    pub trains: Vec<Train>,
    /// Committed turns
    pub turns: Vec<Turn>,
}

impl DispatchReport {
    /// `false` when the two stations are not connected at all
    pub fn has_route(&self) -> bool {
        !self.paths.is_empty()
    }

    pub fn arrived_count(&self) -> usize {
        self.trains.iter().filter(|train| !train.is_active()).count()
    }

    /// Log a summary of the run
    pub fn log_summary(&self) {
        info!("=== DISPATCH COMPLETE ===");
        info!("Routes found: {}", self.paths.len());
        info!("Trains per route: {:?}", pipeline_loads(&self.trains, &self.paths));
        info!("Turns taken: {}", self.turns.len());
        info!("Trains arrived: {}/{}", self.arrived_count(), self.trains.len());
    }
}

/// Find routes from `start` to `end`, spread `train_count` trains over them
/// and simulate their movement.
///
/// At most `train_count` routes are searched for since more could never be
/// used. The caller checks that both stations exist and differ.
pub fn run_dispatch(
    network: &RailNetwork,
    start: &str,
    end: &str,
    train_count: usize,
) -> DispatchReport {
    let paths = find_paths(network, start, end, train_count);
    let mut trains = assign_to_pipelines(&paths, train_count);
    let turns = simulate(&mut trains);

    let report = DispatchReport {
        paths,
        trains,
        turns,
    };
    report.log_summary();
    report
}
