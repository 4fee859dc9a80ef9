//! Collaborative drawing relay server.
//!
//! Receives `draw` / `clear` events from clients and relays them to all other
//! connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tegaki-server
//! cargo run --bin tegaki-server -- --host 127.0.0.1 --port 3000
//! PORT=8080 cargo run --bin tegaki-server
//! ```

use std::sync::Arc;

use clap::Parser;
use tegaki_server::{infrastructure::registry::InMemoryConnectionRegistry, ui::Server};
use tegaki_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "tegaki-server")]
#[command(about = "Collaborative drawing relay over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "5000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_CRATE_NAME"), "debug");

    let args = Args::parse();

    // 1. ConnectionRegistry（インメモリ）
    let registry = Arc::new(InMemoryConnectionRegistry::new());

    // 2. Server（UseCase の組み立ては Server が行う）
    let server = Server::new(registry, Arc::new(SystemClock));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
