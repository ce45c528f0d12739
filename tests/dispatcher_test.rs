//! Movement simulation tests

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use rail_dispatch::simulation::{
    assign_to_pipelines, find_paths, run_dispatch, simulate, Dispatcher, EdgeKey, Move,
    RailNetwork, Train, TrainId, TrainState, Turn,
};

fn moves(turn: &Turn) -> Vec<String> {
    turn.moves.iter().map(ToString::to_string).collect()
}

fn route(stations: &[&str]) -> Rc<[String]> {
    stations.iter().map(|s| s.to_string()).collect()
}

fn diamond() -> RailNetwork {
    RailNetwork::from_connections(&[("a", "b"), ("b", "c"), ("a", "d"), ("d", "c")])
}

fn bottleneck() -> RailNetwork {
    RailNetwork::from_connections(&[("a", "b"), ("b", "c")])
}

fn grid(size: usize) -> RailNetwork {
    let names: Vec<Vec<String>> = (0..size)
        .map(|r| (0..size).map(|c| format!("r{r}c{c}")).collect())
        .collect();

    let mut connections = Vec::new();
    for r in 0..size {
        for c in 0..size {
            if c + 1 < size {
                connections.push((names[r][c].as_str(), names[r][c + 1].as_str()));
            }
            if r + 1 < size {
                connections.push((names[r][c].as_str(), names[r + 1][c].as_str()));
            }
        }
    }
    RailNetwork::from_connections(&connections)
}

#[test]
fn test_diamond_two_trains() {
    let network = diamond();
    let paths = find_paths(&network, "a", "c", 2);
    let mut trains = assign_to_pipelines(&paths, 2);

    let turns = simulate(&mut trains);

    assert_eq!(turns.len(), 2);
    assert_eq!(moves(&turns[0]), vec!["T1-b", "T2-d"]);
    assert_eq!(moves(&turns[1]), vec!["T1-c", "T2-c"]);
    assert_eq!(turns[1].number, 2);
    assert!(trains
        .iter()
        .all(|train| train.state == TrainState::Arrived && !train.is_active()));
}

#[test]
fn test_bottleneck_moves_single_file() {
    let network = bottleneck();
    let paths = find_paths(&network, "a", "c", 2);
    let mut trains = assign_to_pipelines(&paths, 2);

    let turns = simulate(&mut trains);

    assert_eq!(turns.len(), 3);
    assert_eq!(moves(&turns[0]), vec!["T1-b"]);
    assert_eq!(moves(&turns[1]), vec!["T1-c", "T2-b"]);
    assert_eq!(moves(&turns[2]), vec!["T2-c"]);
    assert!(trains.iter().all(|train| !train.is_active()));
}

#[test]
fn test_bottleneck_with_four_trains() {
    let network = bottleneck();
    let paths = find_paths(&network, "a", "c", 4);
    let mut trains = assign_to_pipelines(&paths, 4);

    let turns = simulate(&mut trains);

    let log: Vec<Vec<String>> = turns.iter().map(moves).collect();
    assert_eq!(
        log,
        vec![
            vec!["T1-b"],
            vec!["T1-c", "T2-b"],
            vec!["T2-c", "T3-b"],
            vec!["T3-c", "T4-b"],
            vec!["T4-c"],
        ]
    );
}

#[test]
fn test_step_reports_waiting_train_and_keeps_claims() {
    let network = bottleneck();
    let paths = find_paths(&network, "a", "c", 2);
    let mut trains = assign_to_pipelines(&paths, 2);
    let mut dispatcher = Dispatcher::new(&trains).expect("fleet is not empty");

    let turn = dispatcher.step(&mut trains).expect("first train can move");
    assert_eq!(turn.moves, vec![Move::new(TrainId(1), "b")]);

    let state: HashMap<TrainId, TrainState> =
        trains.iter().map(|train| (train.id, train.state)).collect();
    assert_eq!(state[&TrainId(1)], TrainState::Moving);
    assert_eq!(state[&TrainId(2)], TrainState::Waiting);

    // Claims carry over into the next turn, the start station is never claimed
    assert_eq!(dispatcher.occupancy().holder("b"), Some(TrainId(1)));
    assert_eq!(dispatcher.occupancy().holder("a"), None);

    dispatcher.step(&mut trains).expect("both trains move");
    assert_eq!(dispatcher.occupancy().holder("b"), Some(TrainId(2)));
    assert_eq!(dispatcher.turns_taken(), 2);

    dispatcher.step(&mut trains).expect("second train arrives");
    assert!(dispatcher.occupancy().is_empty());
    assert!(dispatcher.step(&mut trains).is_none());
    assert_eq!(dispatcher.turns_taken(), 3);
}

#[test]
fn test_shared_connection_is_used_once_per_turn() {
    let network = RailNetwork::from_connections(&[("a", "e")]);
    let paths = find_paths(&network, "a", "e", 3);
    let mut trains = assign_to_pipelines(&paths, 3);

    let turns = simulate(&mut trains);

    let log: Vec<Vec<String>> = turns.iter().map(moves).collect();
    assert_eq!(log, vec![vec!["T1-e"], vec!["T2-e"], vec!["T3-e"]]);
}

#[test]
fn test_further_trains_act_first() {
    let path = route(&["a", "b", "c", "d"]);
    let mut trains = vec![
        Train::new(TrainId(1), path.clone()),
        Train::new(TrainId(2), path.clone()),
    ];
    trains[1].index = 1;
    trains[1].state = TrainState::Moving;

    let mut dispatcher = Dispatcher::new(&trains).expect("fleet is not empty");
    let turn = dispatcher.step(&mut trains).expect("trains can move");

    assert_eq!(moves(&turn), vec!["T2-c", "T1-b"]);
    assert_eq!(trains[0].id, TrainId(2));
}

#[test]
fn test_equal_progress_keeps_previous_turn_order() {
    let mut trains = vec![
        Train::new(TrainId(1), route(&["s", "a", "q", "e"])),
        Train::new(TrainId(2), route(&["s", "b", "q", "e"])),
        Train::new(TrainId(3), route(&["s", "x", "p", "q", "e"])),
    ];
    trains[1].index = 1;
    trains[2].index = 2;

    let mut dispatcher = Dispatcher::new(&trains).expect("fleet is not empty");

    // T3 takes q, so T2 waits while T1 catches up to the same progress
    let turn = dispatcher.step(&mut trains).expect("trains can move");
    assert_eq!(moves(&turn), vec!["T3-q", "T1-a"]);
    assert_eq!(trains[1].index, trains[2].index);

    // T2 was ahead of T1 last turn and still goes first for q
    let turn = dispatcher.step(&mut trains).expect("trains can move");
    assert_eq!(moves(&turn), vec!["T3-e", "T2-q"]);

    let order: Vec<TrainId> = trains.iter().map(|train| train.id).collect();
    assert_eq!(order, vec![TrainId(3), TrainId(2), TrainId(1)]);
    assert_eq!(dispatcher.occupancy().holder("q"), Some(TrainId(2)));
    assert_eq!(dispatcher.occupancy().holder("a"), Some(TrainId(1)));
}

#[test]
fn test_empty_fleet_produces_no_turns() {
    let mut trains: Vec<Train> = Vec::new();

    assert!(simulate(&mut trains).is_empty());
    assert!(Dispatcher::new(&trains).is_none());
}

#[test]
fn test_edge_key_ignores_direction() {
    assert_eq!(EdgeKey::new("a", "b"), EdgeKey::new("b", "a"));
    assert_ne!(EdgeKey::new("a", "b"), EdgeKey::new("a", "c"));
}

#[test]
fn test_no_station_or_connection_is_shared() {
    let network = grid(5);
    let paths = find_paths(&network, "r0c0", "r4c4", 7);
    let mut trains = assign_to_pipelines(&paths, 7);
    let mut dispatcher = Dispatcher::new(&trains).expect("fleet is not empty");

    let mut turn_count = 0;
    loop {
        let before: HashMap<TrainId, String> = trains
            .iter()
            .map(|train| (train.id, train.current_station().to_owned()))
            .collect();

        let Some(turn) = dispatcher.step(&mut trains) else {
            break;
        };
        turn_count += 1;

        let mut edges = HashSet::new();
        for m in &turn.moves {
            assert!(
                edges.insert(EdgeKey::new(&before[&m.train], &m.station)),
                "connection used twice in turn {}",
                turn.number
            );
        }

        let mut resting = HashSet::new();
        for train in trains.iter().filter(|train| train.is_active()) {
            let station = train.current_station();
            if station != "r0c0" {
                assert!(
                    resting.insert(station.to_owned()),
                    "{station} holds two trains after turn {}",
                    turn.number
                );
                assert_eq!(dispatcher.occupancy().holder(station), Some(train.id));
            }
        }
    }

    assert!(turn_count > 0);
    assert!(trains.iter().all(|train| !train.is_active()));
}

#[test]
fn test_run_dispatch_reports_everything() {
    let report = run_dispatch(&diamond(), "a", "c", 3);

    assert!(report.has_route());
    assert_eq!(report.paths.len(), 2);
    assert_eq!(report.trains.len(), 3);
    assert_eq!(report.arrived_count(), 3);

    let log: Vec<Vec<String>> = report.turns.iter().map(moves).collect();
    assert_eq!(
        log,
        vec![vec!["T1-b", "T2-d"], vec!["T1-c", "T2-c", "T3-b"], vec!["T3-c"]]
    );
}

#[test]
fn test_run_dispatch_without_route() {
    let network = RailNetwork::from_connections(&[("a", "b"), ("c", "d")]);

    let report = run_dispatch(&network, "a", "d", 2);

    assert!(!report.has_route());
    assert!(report.trains.is_empty());
    assert!(report.turns.is_empty());
}
