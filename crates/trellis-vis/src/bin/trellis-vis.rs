//! Trellis Mind-Map Server
//!
//! Serve the demo mind map and accept live deliveries.

use std::env;

use trellis_vis::{demo_session, demo_suggestion, MapServer, DEMO_MAP_ID};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();

    let port: u16 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3000);
    let with_suggestion = args.iter().any(|a| a == "--suggest");

    let mut session = demo_session()?;
    if with_suggestion {
        let (graph, summary) = demo_suggestion();
        session.receive_suggestion(&DEMO_MAP_ID.into(), graph, summary)?;
    }

    println!("Trellis Mind-Map Server");
    println!("=======================");
    println!();
    println!("Map: {} ({:?})", DEMO_MAP_ID, session.state());
    println!("Nodes: {}", session.composite().node_count());
    println!();
    println!("Starting server on http://localhost:{}", port);
    println!("POST /api/snapshot and /api/suggestion to deliver, /ws to watch.");
    println!();

    let server = MapServer::new(session);
    server.serve(port).await?;

    Ok(())
}
