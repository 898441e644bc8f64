//! Per-map session: base graph, suggestion overlay, derived composite
//! and positions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use trellis_graph::{Graph, NodeId};
use trellis_layout::{layout, LayoutConfig, LayoutPosition};
use trellis_overlay::{compose, CompositeGraph};

use crate::SyncError;

/// Identifier of one mind-map session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(pub String);

impl From<&str> for MapId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MapId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No base graph delivered yet.
    Empty,
    /// Base graph present, no suggestion.
    Ready,
    /// Base graph present with a suggestion overlay on top.
    Suggested,
}

/// Why a delivered suggestion was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// Arrived before any base snapshot; there is nothing to compose
    /// against.
    NoBaseGraph,
    /// Addressed to a different map session.
    MapMismatch,
}

/// Result of delivering a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// Installed; the session is now `Suggested`.
    Applied,
    /// Dropped without touching state.
    Discarded(DiscardReason),
}

#[derive(Debug, Clone)]
struct Suggestion {
    graph: Graph,
    summary: String,
}

/// The sole owner of one session's graph state.
///
/// All mutation goes through `receive_snapshot`, `receive_suggestion`
/// and `clear_suggestion`; readers get the cached composite and
/// positions, which are only recomputed when topology actually changes.
#[derive(Debug, Clone)]
pub struct MapSession {
    map_id: MapId,
    config: LayoutConfig,
    base: Option<Graph>,
    suggestion: Option<Suggestion>,
    composite: CompositeGraph,
    positions: HashMap<NodeId, LayoutPosition>,
}

impl MapSession {
    /// Open a session with default layout geometry.
    pub fn new(map_id: impl Into<MapId>) -> Self {
        Self::with_config(map_id, LayoutConfig::default())
    }

    /// Open a session with explicit layout geometry.
    pub fn with_config(map_id: impl Into<MapId>, config: LayoutConfig) -> Self {
        Self {
            map_id: map_id.into(),
            config,
            base: None,
            suggestion: None,
            composite: CompositeGraph::default(),
            positions: HashMap::new(),
        }
    }

    /// This session's map id.
    pub fn map_id(&self) -> &MapId {
        &self.map_id
    }

    /// Layout geometry in effect.
    pub fn layout_config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lifecycle state, derived from which graphs are present.
    pub fn state(&self) -> SessionState {
        match (&self.base, &self.suggestion) {
            (None, _) => SessionState::Empty,
            (Some(_), None) => SessionState::Ready,
            (Some(_), Some(_)) => SessionState::Suggested,
        }
    }

    /// The current render-ready composite.
    pub fn composite(&self) -> &CompositeGraph {
        &self.composite
    }

    /// Current positions, keyed by node id across both provenances.
    pub fn positions(&self) -> &HashMap<NodeId, LayoutPosition> {
        &self.positions
    }

    /// The canonical base graph, if one has been delivered.
    pub fn base(&self) -> Option<&Graph> {
        self.base.as_ref()
    }

    /// Summary text of the active suggestion, if any.
    pub fn summary(&self) -> Option<&str> {
        self.suggestion.as_ref().map(|s| s.summary.as_str())
    }

    /// Replace the base graph wholesale with a delivered snapshot.
    ///
    /// A snapshot always invalidates any outstanding suggestion: it was
    /// computed against a base state that no longer exists. On
    /// validation failure nothing changes.
    pub fn receive_snapshot(&mut self, graph: Graph) -> Result<(), SyncError> {
        graph.validate()?;

        // Identical topology with no overlay active: content may have
        // changed, positions have not earned a recompute.
        let keep_positions = self.suggestion.is_none()
            && self
                .base
                .as_ref()
                .is_some_and(|base| base.same_topology(&graph));

        if self.suggestion.take().is_some() {
            tracing::debug!(map = %self.map_id, "snapshot supersedes active suggestion");
        }
        self.composite = CompositeGraph::from_base(&graph);
        if !keep_positions {
            self.positions = layout(&graph, &self.config);
        }
        self.base = Some(graph);
        Ok(())
    }

    /// Install a suggestion overlay delivered by the push feed.
    ///
    /// Applied only when addressed to this map and a base graph exists.
    /// Rejections (invalid overlay, id collision) are errors that leave
    /// the session untouched; discards are quiet non-events.
    pub fn receive_suggestion(
        &mut self,
        map_id: &MapId,
        graph: Graph,
        summary: impl Into<String>,
    ) -> Result<SuggestionOutcome, SyncError> {
        if map_id != &self.map_id {
            tracing::debug!(
                map = %self.map_id,
                addressed = %map_id,
                "ignoring suggestion for another map"
            );
            return Ok(SuggestionOutcome::Discarded(DiscardReason::MapMismatch));
        }
        let Some(base) = self.base.as_ref() else {
            tracing::debug!(
                map = %self.map_id,
                "suggestion arrived before any base snapshot, discarding"
            );
            return Ok(SuggestionOutcome::Discarded(DiscardReason::NoBaseGraph));
        };

        let base_ids: HashSet<NodeId> = base.nodes.iter().map(|n| n.id.clone()).collect();
        graph.validate_overlay(&base_ids)?;

        // Trial-compose before committing anything.
        let composite = compose(base, Some(&graph))?;
        self.positions = layout(&composite.to_graph(), &self.config);
        self.composite = composite;
        self.suggestion = Some(Suggestion {
            graph,
            summary: summary.into(),
        });
        Ok(SuggestionOutcome::Applied)
    }

    /// Drop the active suggestion, if any. Idempotent; returns whether
    /// an overlay was actually cleared.
    pub fn clear_suggestion(&mut self) -> bool {
        if self.suggestion.take().is_none() {
            return false;
        }
        match self.base.as_ref() {
            Some(base) => {
                self.composite = CompositeGraph::from_base(base);
                self.positions = layout(base, &self.config);
            }
            // Unreachable by construction: a suggestion requires a base.
            None => {
                self.composite = CompositeGraph::default();
                self.positions = HashMap::new();
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_graph::{Edge, InvalidGraph, Node};
    use trellis_overlay::{ComposeError, Provenance};

    fn base_ab() -> Graph {
        Graph::new()
            .with_node(Node::new("a", "given", "premise"))
            .with_node(Node::new("b", "therefore", "conclusion"))
            .with_edge(Edge::new("e1", "a", "b", "implies"))
    }

    fn base_abc() -> Graph {
        base_ab()
            .with_node(Node::new("c", "check", "step"))
            .with_edge(Edge::new("e2", "b", "c", "verify"))
    }

    fn suggestion_s1() -> Graph {
        Graph::new().with_node(Node::new("sugg-1", "hint", "step"))
    }

    #[test]
    fn fresh_session_is_empty() {
        let session = MapSession::new("m1");
        assert_eq!(session.state(), SessionState::Empty);
        assert!(session.composite().is_empty());
        assert!(session.positions().is_empty());
        assert!(session.base().is_none());
        assert!(session.summary().is_none());
    }

    #[test]
    fn snapshot_brings_session_ready() {
        let mut session = MapSession::new("m1");
        session.receive_snapshot(base_ab()).unwrap();

        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.composite().node_count(), 2);
        assert_eq!(session.positions().len(), 2);

        // A at rank 0, B at rank 1.
        let a = session.positions()[&NodeId::from("a")];
        let b = session.positions()[&NodeId::from("b")];
        assert_eq!(a.x, 0.0);
        assert!(b.x > a.x);
    }

    #[test]
    fn invalid_snapshot_leaves_prior_state() {
        let mut session = MapSession::new("m1");
        session.receive_snapshot(base_ab()).unwrap();

        let bad = Graph::new().with_edge(Edge::new("e1", "x", "y", ""));
        let err = session.receive_snapshot(bad).unwrap_err();
        assert!(matches!(err, SyncError::Graph(InvalidGraph::DanglingEdge { .. })));

        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.composite().node_count(), 2);
    }

    #[test]
    fn suggestion_while_empty_is_discarded() {
        let mut session = MapSession::new("m1");
        let outcome = session
            .receive_suggestion(&"m1".into(), suggestion_s1(), "hint")
            .unwrap();

        assert_eq!(
            outcome,
            SuggestionOutcome::Discarded(DiscardReason::NoBaseGraph)
        );
        assert_eq!(session.state(), SessionState::Empty);
        assert!(session.summary().is_none());
    }

    #[test]
    fn suggestion_for_other_map_is_ignored() {
        let mut session = MapSession::new("m1");
        session.receive_snapshot(base_ab()).unwrap();

        let outcome = session
            .receive_suggestion(&"m2".into(), suggestion_s1(), "hint")
            .unwrap();
        assert_eq!(
            outcome,
            SuggestionOutcome::Discarded(DiscardReason::MapMismatch)
        );
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn suggestion_overlays_composite() {
        let mut session = MapSession::new("m1");
        session.receive_snapshot(base_ab()).unwrap();

        let outcome = session
            .receive_suggestion(&"m1".into(), suggestion_s1(), "consider this")
            .unwrap();
        assert_eq!(outcome, SuggestionOutcome::Applied);
        assert_eq!(session.state(), SessionState::Suggested);
        assert_eq!(session.summary(), Some("consider this"));

        let composite = session.composite();
        assert_eq!(composite.node_count(), 3);
        assert_eq!(composite.nodes_with(Provenance::Base).count(), 2);
        assert_eq!(composite.nodes_with(Provenance::Suggestion).count(), 1);
        assert_eq!(session.positions().len(), 3);
    }

    #[test]
    fn colliding_suggestion_rejected_state_retained() {
        let mut session = MapSession::new("m1");
        session.receive_snapshot(base_ab()).unwrap();
        session
            .receive_suggestion(&"m1".into(), suggestion_s1(), "first")
            .unwrap();

        let colliding = Graph::new().with_node(Node::new("a", "impostor", "step"));
        let err = session
            .receive_suggestion(&"m1".into(), colliding, "second")
            .unwrap_err();
        assert!(matches!(
            err,
            SyncError::Compose(ComposeError::IdentifierCollision { .. })
        ));

        // The first suggestion is still in place, untouched.
        assert_eq!(session.state(), SessionState::Suggested);
        assert_eq!(session.summary(), Some("first"));
        assert_eq!(session.composite().node_count(), 3);
    }

    #[test]
    fn snapshot_supersedes_suggestion() {
        let mut session = MapSession::new("m1");
        session.receive_snapshot(base_ab()).unwrap();
        session
            .receive_suggestion(&"m1".into(), suggestion_s1(), "hint")
            .unwrap();
        assert_eq!(session.state(), SessionState::Suggested);

        session.receive_snapshot(base_abc()).unwrap();

        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.summary().is_none());
        let composite = session.composite();
        assert_eq!(composite.node_count(), 3);
        assert!(composite
            .nodes
            .iter()
            .all(|n| n.provenance == Provenance::Base));

        // C extends the chain to rank 2.
        let b = session.positions()[&NodeId::from("b")];
        let c = session.positions()[&NodeId::from("c")];
        assert!(c.x > b.x);
    }

    #[test]
    fn clear_suggestion_returns_to_ready() {
        let mut session = MapSession::new("m1");
        session.receive_snapshot(base_ab()).unwrap();
        session
            .receive_suggestion(&"m1".into(), suggestion_s1(), "hint")
            .unwrap();

        assert!(session.clear_suggestion());
        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.summary().is_none());
        assert_eq!(session.composite().node_count(), 2);
        assert_eq!(session.positions().len(), 2);
    }

    #[test]
    fn clear_suggestion_is_idempotent() {
        let mut session = MapSession::new("m1");
        assert!(!session.clear_suggestion());

        session.receive_snapshot(base_ab()).unwrap();
        assert!(!session.clear_suggestion());
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn identical_topology_redelivery_keeps_positions() {
        let mut session = MapSession::new("m1");
        session.receive_snapshot(base_ab()).unwrap();
        let before = session.positions().clone();

        // Same ids, different content: a pure re-render.
        let retouched = Graph::new()
            .with_node(Node::new("a", "given (edited)", "premise"))
            .with_node(Node::new("b", "therefore", "conclusion"))
            .with_edge(Edge::new("e1", "a", "b", "still implies"));
        session.receive_snapshot(retouched).unwrap();

        assert_eq!(session.positions(), &before);
        assert_eq!(
            session.base().map(|b| b.node(&"a".into()).map(|n| n.content.clone())),
            Some(Some("given (edited)".to_string()))
        );
    }

    #[test]
    fn changed_topology_relayouts() {
        let mut session = MapSession::new("m1");
        session.receive_snapshot(base_ab()).unwrap();
        session.receive_snapshot(base_abc()).unwrap();
        assert_eq!(session.positions().len(), 3);
    }

    #[test]
    fn suggestion_edge_may_anchor_to_base() {
        let mut session = MapSession::new("m1");
        session.receive_snapshot(base_ab()).unwrap();

        let anchored = Graph::new()
            .with_node(Node::new("sugg-1", "missing case", "step"))
            .with_edge(Edge::new("sugg-e1", "b", "sugg-1", "also consider"));
        let outcome = session
            .receive_suggestion(&"m1".into(), anchored, "gap found")
            .unwrap();

        assert_eq!(outcome, SuggestionOutcome::Applied);
        // The anchored overlay node ranks after its base anchor.
        let b = session.positions()[&NodeId::from("b")];
        let s = session.positions()[&NodeId::from("sugg-1")];
        assert!(s.x > b.x);
    }
}
