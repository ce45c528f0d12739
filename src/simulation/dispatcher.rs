//! Turn-based movement of the fleet
//!
//! Each turn every active train either advances one station or waits. Trains
//! further along their route act first. Within a turn a connection carries at
//! most one train, and a station between the endpoints holds at most one train
//! across turns. The start station holds any number of departing trains and
//! the end station accepts every arrival.

use log::trace;
use std::collections::HashSet;

use super::occupancy::StationLocks;
use super::train::Train;
use super::types::{EdgeKey, Move, Turn};

/// Owns the station locks for one simulation run
#[derive(Debug, Clone)]
pub struct Dispatcher {
    start: String,
    end: String,
    occupancy: StationLocks,
    turns_taken: usize,
}

impl Dispatcher {
    /// Create a dispatcher for a fleet. All trains share the start and end
    /// station of the first train's route. Returns `None` for an empty fleet.
    pub fn new(trains: &[Train]) -> Option<Self> {
        let path = &trains.first()?.path;
        Some(Self {
            start: path.first()?.clone(),
            end: path.last()?.clone(),
            occupancy: StationLocks::new(),
            turns_taken: 0,
        })
    }

    pub fn occupancy(&self) -> &StationLocks {
        &self.occupancy
    }

    pub fn turns_taken(&self) -> usize {
        self.turns_taken
    }

    /// Run a single turn.
    ///
    /// `trains` is reordered by priority: descending progress, ties keeping
    /// their order from the previous turn (not creation order). Returns
    /// `None` when no train could move, which ends the simulation.
    pub fn step(&mut self, trains: &mut [Train]) -> Option<Turn> {
        trains.sort_by(|a, b| b.index.cmp(&a.index));

        let mut used_edges: HashSet<EdgeKey> = HashSet::new();
        let mut moves = Vec::new();

        for train in trains.iter_mut() {
            if !train.is_active() {
                continue;
            }
            let Some(next) = train.next_station().map(str::to_owned) else {
                continue;
            };
            let current = train.current_station().to_owned();

            if current != self.start {
                self.occupancy.release(&current, train.id);
            }

            let edge = EdgeKey::new(&current, &next);
            let edge_taken = used_edges.contains(&edge);
            let station_taken = next != self.end && self.occupancy.is_held_by_other(&next, train.id);

            if edge_taken || station_taken {
                trace!(
                    "{} waits at {current}: {}",
                    train.id,
                    if edge_taken {
                        format!("connection {current}-{next} in use")
                    } else {
                        format!("{next} occupied")
                    }
                );
                if current != self.start {
                    self.occupancy.claim(&current, train.id);
                }
                train.wait();
                continue;
            }

            train.advance();
            used_edges.insert(edge);
            if next != self.end {
                self.occupancy.claim(&next, train.id);
            }
            moves.push(Move::new(train.id, next));
        }

        if moves.is_empty() {
            return None;
        }

        self.turns_taken += 1;
        Some(Turn {
            number: self.turns_taken,
            moves,
        })
    }
}

/// Run the fleet until no train can move and return the committed turns.
///
/// An empty fleet produces no turns.
pub fn simulate(trains: &mut [Train]) -> Vec<Turn> {
    let Some(mut dispatcher) = Dispatcher::new(trains) else {
        return Vec::new();
    };

    let mut turns = Vec::new();
    while let Some(turn) = dispatcher.step(trains) {
        turns.push(turn);
    }
    turns
}
