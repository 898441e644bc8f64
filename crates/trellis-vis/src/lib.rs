//! Trellis Mind-Map Visualization
//!
//! The delivery and rendering surface around a trellis session.
//!
//! # Architecture
//!
//! - **View**: flattens composite + positions into one render-ready JSON
//!   payload
//! - **Server**: axum REST + WebSocket; snapshots delivered by request,
//!   suggestions pushed unsolicited, renderers stream live views
//! - **Demo**: deterministic sample content for the binary and tests
//!
//! # Usage
//!
//! ```ignore
//! let session = demo_session()?;
//! let server = MapServer::new(session);
//! server.serve(3000).await?;
//! ```

mod demo;
mod server;
mod view;

pub use demo::{demo_base, demo_session, demo_suggestion, DEMO_MAP_ID};
pub use server::MapServer;
pub use view::{RenderEdge, RenderNode, RenderView};
