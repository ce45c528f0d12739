//! Train assignment
//!
//! Spreads a fleet over the discovered routes. Every route gets one train
//! first; extra trains go where `trains already assigned + route length` is
//! smallest, which keeps long routes from being preferred just because they
//! are empty.

use log::{debug, warn};
use std::rc::Rc;

use super::train::Train;
use super::types::TrainId;

/// Assign `train_count` trains to `paths`.
///
/// Trains are numbered from 1 in creation order. With no paths there is
/// nothing to bind a train to and the fleet is empty.
pub fn assign_to_pipelines(paths: &[Vec<String>], train_count: usize) -> Vec<Train> {
    if paths.is_empty() {
        if train_count > 0 {
            warn!("No routes to assign {train_count} trains to");
        }
        return Vec::new();
    }

    let pipelines: Vec<Rc<[String]>> = paths.iter().map(|path| Rc::from(path.as_slice())).collect();
    let edge_counts: Vec<usize> = paths
        .iter()
        .map(|path| path.len().saturating_sub(1))
        .collect();

    let mut loads = vec![0usize; paths.len()];
    let mut assignments = Vec::with_capacity(train_count);

    for (pipeline, load) in loads.iter_mut().enumerate().take(train_count) {
        assignments.push(pipeline);
        *load = 1;
    }

    for _ in paths.len()..train_count {
        // min_by_key keeps the first of equal keys, so earlier routes win ties
        let best = (0..paths.len())
            .min_by_key(|&pipeline| (loads[pipeline] + edge_counts[pipeline], edge_counts[pipeline]))
            .unwrap_or(0);
        assignments.push(best);
        loads[best] += 1;
    }

    debug!("Trains per route: {loads:?}");

    assignments
        .into_iter()
        .enumerate()
        .map(|(i, pipeline)| Train::new(TrainId(i + 1), Rc::clone(&pipelines[pipeline])))
        .collect()
}

/// Number of trains bound to each path, in path order
pub fn pipeline_loads(trains: &[Train], paths: &[Vec<String>]) -> Vec<usize> {
    paths
        .iter()
        .map(|path| {
            trains
                .iter()
                .filter(|train| train.path.as_ref() == path.as_slice())
                .count()
        })
        .collect()
}
