//! Yubin relay server.
//!
//! Every connection joins the room of its own identity; messages are routed to
//! the room of the destination identity and fanned out to all its connections.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin yubin-server
//! cargo run --bin yubin-server -- --host 0.0.0.0 --port 3000 --token s3cret=alice
//! ```

use std::sync::Arc;

use clap::Parser;
use yubin_server::{
    domain::Authenticator,
    infrastructure::{
        auth::{StaticTokenAuthenticator, TrustedIdentityAuthenticator},
        mailbox::{OverflowPolicy, RoomRegistry},
    },
    ui::Server,
    usecase::{ConnectMemberUseCase, DisconnectMemberUseCase, ListRoomsUseCase, SendMessageUseCase},
};
use yubin_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "yubin-server")]
#[command(about = "WebSocket message relay with per-identity rooms", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Capacity of each connection's outbound queue
    #[arg(long, default_value = "256")]
    outbox_capacity: usize,

    /// Behavior when a connection's outbound queue is full
    /// (block, drop-message or disconnect)
    #[arg(long, default_value = "disconnect")]
    overflow_policy: OverflowPolicy,

    /// Accepted credential as `<token>=<identity>` (repeatable). Without any,
    /// the credential itself is trusted as the identity.
    #[arg(long = "token", value_name = "TOKEN=IDENTITY")]
    tokens: Vec<String>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Registry
    // 2. Authenticator
    // 3. UseCases
    // 4. Server

    // 1. Create the room registry
    let policy = args.overflow_policy;
    let registry = Arc::new(RoomRegistry::new(policy));
    tracing::info!(
        "Room registry ready (overflow policy: {}, outbox capacity: {})",
        policy,
        args.outbox_capacity
    );

    // 2. Create the authenticator
    let authenticator: Arc<dyn Authenticator> = if args.tokens.is_empty() {
        tracing::warn!("No --token given; trusting credentials as identities");
        Arc::new(TrustedIdentityAuthenticator)
    } else {
        match StaticTokenAuthenticator::from_entries(&args.tokens) {
            Ok(authenticator) => {
                tracing::info!("Loaded {} static token(s)", authenticator.len());
                Arc::new(authenticator)
            }
            Err(e) => {
                tracing::error!("Invalid --token: {}", e);
                std::process::exit(1);
            }
        }
    };

    // 3. Create UseCases
    let connect_member_usecase = Arc::new(ConnectMemberUseCase::new(registry.clone()));
    let disconnect_member_usecase = Arc::new(DisconnectMemberUseCase::new(registry.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(registry.clone()));
    let list_rooms_usecase = Arc::new(ListRoomsUseCase::new(registry));

    // 4. Create and run the server
    let server = Server::new(
        connect_member_usecase,
        disconnect_member_usecase,
        send_message_usecase,
        list_rooms_usecase,
        authenticator,
    )
    .with_outbox_capacity(args.outbox_capacity);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
