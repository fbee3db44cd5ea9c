//! UI 層
//!
//! axum のルーター、HTTP / WebSocket ハンドラー、アプリケーション状態を提供します。

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
