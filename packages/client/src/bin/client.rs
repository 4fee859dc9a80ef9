//! Terminal client for the collaborative drawing relay.
//!
//! Draws by typing gestures at the prompt (`stroke 0,0 10,10 20,5`), clears the
//! shared canvas with `clear`, and applies events from other users to a local
//! canvas (`show`). Automatically reconnects on disconnection (max 5 attempts
//! with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tegaki-client
//! cargo run --bin tegaki-client -- --url ws://192.168.0.10:5000/ws
//! ```

use clap::Parser;
use tegaki_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tegaki-client")]
#[command(about = "Terminal client for the collaborative drawing relay", long_about = None)]
struct Args {
    /// WebSocket URL of the relay server
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:5000/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_CRATE_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = tegaki_client::run_client(args.url).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
