//! Station locks for the dispatcher
//!
//! A station between the start and the end of a route can hold one train at a
//! time. Claims persist from one turn into the next.

use std::collections::HashMap;

use super::types::TrainId;

/// Exclusive claims on interior stations
#[derive(Debug, Clone, Default)]
pub struct StationLocks {
    held: HashMap<String, TrainId>,
}

impl StationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a station for a train
    pub fn claim(&mut self, station: &str, train: TrainId) {
        self.held.insert(station.to_owned(), train);
    }

    /// Release the lock if it is held by `train`
    pub fn release(&mut self, station: &str, train: TrainId) {
        if self.held.get(station) == Some(&train) {
            self.held.remove(station);
        }
    }

    /// The train currently resting on a station, if any
    pub fn holder(&self, station: &str) -> Option<TrainId> {
        self.held.get(station).copied()
    }

    /// Check if a station is held by some train other than `train`
    pub fn is_held_by_other(&self, station: &str, train: TrainId) -> bool {
        matches!(self.held.get(station), Some(holder) if *holder != train)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}
