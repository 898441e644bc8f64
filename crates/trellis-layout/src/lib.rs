//! Trellis Layout Engine
//!
//! Deterministic layered placement for directed mind-map graphs, flowing
//! left to right.
//!
//! # Pipeline
//!
//! 1. **Rank assignment**: every node gets an integer layer equal to its
//!    longest-path distance from a source, with cycles tolerated by
//!    excluding back-edges from the computation.
//! 2. **Crossing reduction**: nodes sharing a rank are reordered by
//!    repeated median-of-neighbors sweeps to untangle edges.
//! 3. **Coordinate assignment**: ranks map to the x axis, in-rank lanes
//!    to the y axis; disconnected components are stacked vertically so
//!    they never overlap.
//!
//! # Determinism
//!
//! The engine is a pure function of its input. Identical node/edge order
//! in, identical positions out: traversal follows delivery order, ties
//! break on prior index, and nothing is randomized. Callers rely on this
//! to keep the picture stable across redeliveries of the same graph.

mod coords;
mod order;
mod rank;

pub use coords::{layout, LayoutConfig, LayoutPosition};
pub use order::{crossing_count, order_ranks};
pub use rank::{assign_ranks, Ranking};
