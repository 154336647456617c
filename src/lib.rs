//! Intersection Simulation Library
//!
//! Simulates cars crossing a single signalled four-way intersection. The
//! engine lives in [`simulation`]; [`render`] turns its state into terminal
//! frames.

pub mod render;
pub mod simulation;
