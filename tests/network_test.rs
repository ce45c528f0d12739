//! Rail network construction tests

use rail_dispatch::simulation::{RailNetwork, Station};

#[test]
fn test_from_connections_ignores_repeated_connections() {
    let network =
        RailNetwork::from_connections(&[("a", "b"), ("b", "a"), ("a", "b"), ("b", "c")]);

    assert_eq!(network.station_count(), 3);
    assert_eq!(network.connection_count(), 2);
    assert_eq!(network.neighbors("b"), vec!["a", "c"]);
}

#[test]
fn test_from_connections_places_stations_in_order() {
    let network = RailNetwork::from_connections(&[("x", "y"), ("y", "z")]);

    let positions: Vec<u64> = ["x", "y", "z"]
        .iter()
        .map(|name| network.station(name).expect("station exists").x)
        .collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[test]
fn test_add_connection_by_name() {
    let mut network = RailNetwork::new();
    network.add_station(Station::new("a", 0, 0));
    network.add_station(Station::new("b", 1, 0));

    assert!(network.add_connection("a", "b").expect("both stations exist"));
    assert!(!network.add_connection("b", "a").expect("both stations exist"));
    assert!(network.has_connection("b", "a"));
    assert_eq!(network.connection_count(), 1);
}

#[test]
fn test_add_connection_to_unknown_station_fails() {
    let mut network = RailNetwork::new();
    network.add_station(Station::new("a", 0, 0));

    let err = network
        .add_connection("a", "nowhere")
        .expect_err("station is missing");

    assert!(err.to_string().contains("\"nowhere\" not found"));
    assert_eq!(network.connection_count(), 0);
}

#[test]
fn test_add_station_is_idempotent() {
    let mut network = RailNetwork::new();

    let first = network.add_station(Station::new("a", 0, 0));
    let second = network.add_station(Station::new("a", 5, 5));

    assert_eq!(first, second);
    assert_eq!(network.station_count(), 1);
    assert_eq!(network.station("a").map(|s| (s.x, s.y)), Some((0, 0)));
}
