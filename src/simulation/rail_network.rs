//! Rail network graph
//!
//! Stations and the undirected connections between them. The network is built
//! once (by the map parser or programmatically) and then only read.

use anyhow::{Context, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// A station in the rail network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub name: String,
    pub x: u64,
    pub y: u64,
}

impl Station {
    pub fn new(name: impl Into<String>, x: u64, y: u64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }
}

/// Undirected rail network keyed by station name
#[derive(Debug, Clone, Default)]
pub struct RailNetwork {
    /// The underlying petgraph undirected graph
    graph: UnGraph<Station, ()>,

    /// Maps station names to their node indices in the graph
    station_to_node: HashMap<String, NodeIndex>,
}

impl RailNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a network from a list of connections.
    ///
    /// Stations are created in order of first appearance and placed on the
    /// x axis. Repeated connections are ignored.
    pub fn from_connections(connections: &[(&str, &str)]) -> Self {
        let mut network = Self::new();
        for (a, b) in connections {
            let a_node = network.node_or_insert(a);
            let b_node = network.node_or_insert(b);
            network.connect_nodes(a_node, b_node);
        }
        network
    }

    fn node_or_insert(&mut self, name: &str) -> NodeIndex {
        match self.node(name) {
            Some(node) => node,
            None => {
                let x = self.station_count() as u64;
                self.add_station(Station::new(name, x, 0))
            }
        }
    }

    /// Adds a station to the network graph.
    /// Returns the existing node if a station with that name is already present.
    pub fn add_station(&mut self, station: Station) -> NodeIndex {
        if let Some(node) = self.station_to_node.get(&station.name) {
            return *node;
        }

        let name = station.name.clone();
        let node = self.graph.add_node(station);
        self.station_to_node.insert(name, node);
        node
    }

    /// Connects two stations by name.
    /// Returns `false` when the two stations are already connected.
    pub fn add_connection(&mut self, a: &str, b: &str) -> Result<bool> {
        let a_node = self
            .node(a)
            .with_context(|| format!("Station {a:?} not found"))?;
        let b_node = self
            .node(b)
            .with_context(|| format!("Station {b:?} not found"))?;

        Ok(self.connect_nodes(a_node, b_node))
    }

    /// Connects two nodes. Returns `false` if the connection already exists.
    pub fn connect_nodes(&mut self, a: NodeIndex, b: NodeIndex) -> bool {
        if self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    /// Checks whether two stations are directly connected
    pub fn has_connection(&self, a: &str, b: &str) -> bool {
        match (self.node(a), self.node(b)) {
            (Some(a), Some(b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn node(&self, name: &str) -> Option<NodeIndex> {
        self.station_to_node.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.station_to_node.contains_key(name)
    }

    pub fn station(&self, name: &str) -> Option<&Station> {
        self.node(name).map(|node| &self.graph[node])
    }

    /// Name of the station at `node`
    pub fn station_name(&self, node: NodeIndex) -> &str {
        &self.graph[node].name
    }

    /// Neighbours of `node` in the order their connections were added.
    ///
    /// Self-loops never lead anywhere and are left out.
    pub fn neighbor_nodes(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges(node)
            .filter_map(|edge| {
                let other = if edge.source() == node {
                    edge.target()
                } else {
                    edge.source()
                };
                (other != node).then_some((edge.id().index(), other))
            })
            .collect();
        edges.sort_by_key(|(edge_index, _)| *edge_index);
        edges.dedup();
        edges.into_iter().map(|(_, other)| other).collect()
    }

    /// Neighbour names of a station, in connection order
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        self.node(name)
            .map(|node| {
                self.neighbor_nodes(node)
                    .into_iter()
                    .map(|other| self.station_name(other))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of distinct stations adjacent to `node`
    pub fn degree(&self, node: NodeIndex) -> usize {
        self.neighbor_nodes(node).len()
    }

    /// Get number of stations
    pub fn station_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get number of connections
    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }
}
