//! Core types for the rail dispatch simulation
//!
//! These are plain value types shared by the path finder, the pipeline
//! assigner and the dispatcher.

use std::fmt;

/// A unique identifier for a train.
/// Train numbers start at 1 and display as `T1`, `T2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainId(pub usize);

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// What a train did during the last turn it was evaluated in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainState {
    /// Blocked this turn (or not evaluated yet), index unchanged
    Waiting,
    /// Advanced one station this turn
    Moving,
    /// Reached the last station of its path. Terminal.
    Arrived,
}

/// Direction independent key for a connection between two stations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey(String, String);

impl EdgeKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_owned(), b.to_owned())
        } else {
            Self(b.to_owned(), a.to_owned())
        }
    }
}

/// A single train movement recorded in the turn log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub train: TrainId,
    /// Station the train arrived at
    pub station: String,
}

impl Move {
    pub fn new(train: TrainId, station: impl Into<String>) -> Self {
        Self {
            train,
            station: station.into(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.train, self.station)
    }
}

/// One committed simulation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// 1-based turn number
    pub number: usize,
    /// Moves in the order the trains were evaluated
    pub moves: Vec<Move>,
}
