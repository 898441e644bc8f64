//! Trellis Sync Controller
//!
//! Owns the lifecycle of one mind-map session: the canonical base graph
//! (wholesale-replaced by each snapshot) and the transient suggestion
//! overlay (installed by push events, dropped on user clear or whenever a
//! new snapshot lands). Every topology change recomposes the overlay and
//! recomputes the layout, so consumers always read a consistent
//! composite + position pair.
//!
//! # Ordering
//!
//! Snapshots and suggestions arrive on independent channels in arbitrary
//! interleavings. The session is single-threaded and processes one event
//! to completion at a time; a snapshot unconditionally clears suggestion
//! state as part of its own transition, so a newer base always fully
//! supersedes whatever suggestion was in flight, regardless of arrival
//! order.

mod error;
mod events;
mod session;

pub use error::{Result, SyncError};
pub use events::{EventOutcome, SessionEvent};
pub use session::{DiscardReason, MapId, MapSession, SessionState, SuggestionOutcome};
