//! Train state for the dispatch simulation

use std::rc::Rc;

use super::types::{TrainId, TrainState};

/// A train bound to one route
#[derive(Debug, Clone)]
pub struct Train {
    pub id: TrainId,
    /// Route shared with every other train on the same pipeline
    pub path: Rc<[String]>,
    /// Position along `path`, starting at 0
    pub index: usize,
    pub state: TrainState,
}

impl Train {
    pub fn new(id: TrainId, path: Rc<[String]>) -> Self {
        let state = if path.len() > 1 {
            TrainState::Waiting
        } else {
            TrainState::Arrived
        };

        Self {
            id,
            path,
            index: 0,
            state,
        }
    }

    /// Whether the train still has somewhere to go
    pub fn is_active(&self) -> bool {
        self.state != TrainState::Arrived
    }

    pub fn last_index(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn current_station(&self) -> &str {
        &self.path[self.index]
    }

    pub fn next_station(&self) -> Option<&str> {
        self.path.get(self.index + 1).map(String::as_str)
    }

    /// Move one station forward along the path.
    /// Returns the new state (`Moving`, or `Arrived` at the last station).
    pub fn advance(&mut self) -> TrainState {
        if self.index < self.last_index() {
            self.index += 1;
        }

        self.state = if self.index == self.last_index() {
            TrainState::Arrived
        } else {
            TrainState::Moving
        };
        self.state
    }

    /// Mark the train as blocked for this turn
    pub fn wait(&mut self) {
        if self.is_active() {
            self.state = TrainState::Waiting;
        }
    }
}
