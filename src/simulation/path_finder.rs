//! Multi-path discovery
//!
//! Finds a handful of routes between two stations that share no interior
//! station, so trains on different routes never meet between the endpoints.
//! The search is greedy: one breadth-first search per neighbour of the start
//! station, each one avoiding the stations claimed by earlier routes.

use log::debug;
use petgraph::graph::NodeIndex;
use std::collections::{HashMap, HashSet, VecDeque};

use super::rail_network::RailNetwork;

/// Finds up to `max_paths` simple paths from `start` to `end` whose interior
/// stations are pairwise disjoint.
///
/// Neighbours of `start` are tried in ascending order of their own degree,
/// ties keeping connection order. The result is sorted by path length, ties
/// keeping discovery order. An empty result means there is no route.
pub fn find_paths(
    network: &RailNetwork,
    start: &str,
    end: &str,
    max_paths: usize,
) -> Vec<Vec<String>> {
    let (Some(start_node), Some(end_node)) = (network.node(start), network.node(end)) else {
        debug!("Cannot search from {start:?} to {end:?}: unknown station");
        return Vec::new();
    };

    let mut first_hops = network.neighbor_nodes(start_node);
    first_hops.sort_by_key(|node| network.degree(*node));

    let mut removed: HashSet<NodeIndex> = HashSet::new();
    let mut paths: Vec<Vec<NodeIndex>> = Vec::new();

    for first_hop in first_hops {
        if paths.len() >= max_paths {
            break;
        }

        // An earlier route already runs through this station
        if removed.contains(&first_hop) {
            debug!(
                "Skipping {}: reserved by an earlier route",
                network.station_name(first_hop)
            );
            continue;
        }

        let Some(path) = bfs_from_neighbor(network, start_node, first_hop, end_node, &removed)
        else {
            debug!(
                "No route to {end:?} through {}",
                network.station_name(first_hop)
            );
            continue;
        };

        removed.extend(path[1..path.len() - 1].iter().copied());
        debug!("Accepted route with {} stops", path.len());
        paths.push(path);
    }

    paths.sort_by_key(Vec::len);

    paths
        .into_iter()
        .map(|path| {
            path.into_iter()
                .map(|node| network.station_name(node).to_owned())
                .collect()
        })
        .collect()
}

/// Breadth-first search from `start` whose first hop is forced to `first_hop`.
/// Returns the fewest-hop path to `end` that avoids `removed`.
fn bfs_from_neighbor(
    network: &RailNetwork,
    start: NodeIndex,
    first_hop: NodeIndex,
    end: NodeIndex,
    removed: &HashSet<NodeIndex>,
) -> Option<Vec<NodeIndex>> {
    let mut came_from: HashMap<NodeIndex, NodeIndex> = HashMap::from([(first_hop, start)]);
    let mut queue = VecDeque::from([first_hop]);

    while let Some(at) = queue.pop_front() {
        if at == end {
            return Some(reconstruct_path(&came_from, end));
        }

        for next in network.neighbor_nodes(at) {
            if next == start || removed.contains(&next) || came_from.contains_key(&next) {
                continue;
            }
            came_from.insert(next, at);
            queue.push_back(next);
        }
    }

    None
}

fn reconstruct_path(came_from: &HashMap<NodeIndex, NodeIndex>, end: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![end];
    let mut at = end;
    while let Some(&previous) = came_from.get(&at) {
        path.push(previous);
        at = previous;
    }
    path.reverse();
    path
}
