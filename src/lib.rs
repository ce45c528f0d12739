//! Rail Dispatch Library
//!
//! Finds disjoint routes through a rail network, spreads a fleet of trains
//! over them and simulates their movement turn by turn.

pub mod map;
pub mod output;
pub mod simulation;
