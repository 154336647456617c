//! Standalone intersection simulation module
//!
//! This module contains the simulation engine: cars, the signal controller,
//! the spawn policy and the per-tick motion resolution. It knows nothing
//! about terminals and can be driven tick by tick from tests.

mod car;
mod config;
mod intersection;
mod spawner;
mod stats;
mod types;
mod world;

pub use car::SimCar;
pub use config::{ConfigError, SimConfig, DEFAULT_CONCURRENT_CARS, DEFAULT_GOAL_CARS};
pub use intersection::{Light, LightTable, Phase, PhaseKind, SignalController, SignalPattern};
pub use spawner::SpawnQueue;
pub use stats::{FinishReason, SimStats};
pub use types::{
    Approach, Axis, CarId, Direction, Movement, Position, EASTBOUND_Y, GRID_HEIGHT, GRID_WIDTH,
    INTERSECTION_END_X, INTERSECTION_END_Y, INTERSECTION_SIZE, INTERSECTION_START_X,
    INTERSECTION_START_Y, NORTHBOUND_X, SOUTHBOUND_X, WESTBOUND_Y,
};
pub use world::{SimWorld, MAX_DRAIN_STEPS, MAX_STEPS};
