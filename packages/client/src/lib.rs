//! Yubin command-line client.
//!
//! Connects to the relay with a credential, sends `<to>: <content>` lines typed
//! at the prompt, and prints every message delivered to its identity.

pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
