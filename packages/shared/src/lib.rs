//! Shared utilities for the Yubin server and client.

pub mod logger;
pub mod time;
