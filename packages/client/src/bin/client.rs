//! Yubin command-line client with reconnection support.
//!
//! Connects to the relay with a credential, sends `<to>: <message>` lines from
//! stdin and prints every message addressed to the authenticated identity.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second
//! interval). A rejected credential ends the client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin yubin-client -- --token alice
//! cargo run --bin yubin-client -- -t s3cret -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use yubin_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "yubin-client")]
#[command(about = "Command-line client for the Yubin relay", long_about = None)]
struct Args {
    /// Credential presented to the relay
    #[arg(short = 't', long)]
    token: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = yubin_client::run_client(args.url, args.token).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
