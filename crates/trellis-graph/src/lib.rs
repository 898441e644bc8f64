//! Trellis Graph Model
//!
//! Canonical representation of a directed mind-map graph: nodes with
//! opaque content, labeled edges between them, and whole-graph snapshots.
//!
//! # Identity
//!
//! Identity is the string id. Two nodes are the same entity iff their ids
//! are equal within the same graph generation; a snapshot always replaces
//! the previous generation wholesale, so ids are never compared across
//! generations.
//!
//! # Invariants
//!
//! A graph is valid when node ids are unique, edge ids are unique, and
//! every edge endpoint resolves to a node in the same graph. Nothing
//! downstream (layout, composition, session state) accepts a graph that
//! has not passed [`Graph::validate`]. Validation is pure and
//! side-effect free.
//!
//! Overlay graphs are the one sanctioned exception to self-containment:
//! their edges may point at nodes of a designated base graph, checked via
//! [`Graph::validate_overlay`].

mod error;
mod model;
mod validate;

pub use error::{InvalidGraph, Result};
pub use model::{Edge, EdgeId, Graph, Node, NodeId};
