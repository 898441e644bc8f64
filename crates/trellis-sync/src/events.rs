//! Inbound session events.
//!
//! Deliveries from the snapshot provider and the suggestion push feed,
//! plus user-initiated clears, expressed as one ordered queue consumed a
//! single event at a time. This replaces ad hoc per-channel callbacks:
//! whatever interleaving the channels produce, the session only ever sees
//! a serial event stream.

use serde::{Deserialize, Serialize};
use trellis_graph::Graph;

use crate::{DiscardReason, MapId, MapSession, SuggestionOutcome, SyncError};

/// One inbound event for a mind-map session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A complete base-graph snapshot was delivered.
    Snapshot { map_id: MapId, graph: Graph },

    /// The push feed delivered a provisional overlay with its summary.
    Suggestion {
        map_id: MapId,
        graph: Graph,
        summary: String,
    },

    /// The user dismissed the active overlay.
    ClearSuggestion,
}

/// What applying an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The base graph was replaced (and any suggestion dropped).
    BaseReplaced,
    /// A suggestion overlay was installed.
    SuggestionApplied,
    /// A suggestion was dropped without touching state.
    SuggestionDiscarded(DiscardReason),
    /// The active suggestion was cleared.
    SuggestionCleared,
    /// Nothing to do (clear with no overlay, snapshot for another map).
    Noop,
}

impl MapSession {
    /// Apply one inbound event to completion.
    ///
    /// Errors leave the session exactly as it was; the caller reports
    /// them and keeps consuming the queue.
    pub fn apply(&mut self, event: SessionEvent) -> Result<EventOutcome, SyncError> {
        match event {
            SessionEvent::Snapshot { map_id, graph } => {
                if &map_id != self.map_id() {
                    tracing::debug!(
                        map = %self.map_id(),
                        addressed = %map_id,
                        "ignoring snapshot for another map"
                    );
                    return Ok(EventOutcome::Noop);
                }
                self.receive_snapshot(graph)?;
                Ok(EventOutcome::BaseReplaced)
            }
            SessionEvent::Suggestion {
                map_id,
                graph,
                summary,
            } => match self.receive_suggestion(&map_id, graph, summary)? {
                SuggestionOutcome::Applied => Ok(EventOutcome::SuggestionApplied),
                SuggestionOutcome::Discarded(reason) => {
                    Ok(EventOutcome::SuggestionDiscarded(reason))
                }
            },
            SessionEvent::ClearSuggestion => {
                if self.clear_suggestion() {
                    Ok(EventOutcome::SuggestionCleared)
                } else {
                    Ok(EventOutcome::Noop)
                }
            }
        }
    }
}
