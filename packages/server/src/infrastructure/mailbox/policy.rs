//! Slow-consumer policy for room fan-out.

use std::{fmt, str::FromStr};

use tokio::sync::mpsc::error::TrySendError;

use crate::domain::Outbox;

/// What a room does when a member's outbound queue is full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Wait for queue space. One slow member stalls fan-out for the whole
    /// room, and every later event of that room waits behind it.
    Block,
    /// Skip the full member for this frame only.
    DropMessage,
    /// Evict the full member. Dropping its queue sender ends its writer and
    /// with it the connection.
    #[default]
    Disconnect,
}

/// Outcome of offering one frame to one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Offer {
    Accepted,
    Dropped,
    Evicted,
    /// The member's writer is gone.
    Closed,
}

impl OverflowPolicy {
    pub(crate) async fn offer(self, outbox: &Outbox, frame: String) -> Offer {
        match self {
            Self::Block => match outbox.send(frame).await {
                Ok(()) => Offer::Accepted,
                Err(_) => Offer::Closed,
            },
            Self::DropMessage | Self::Disconnect => match outbox.try_send(frame) {
                Ok(()) => Offer::Accepted,
                Err(TrySendError::Closed(_)) => Offer::Closed,
                Err(TrySendError::Full(_)) if self == Self::DropMessage => Offer::Dropped,
                Err(TrySendError::Full(_)) => Offer::Evicted,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::DropMessage => "drop-message",
            Self::Disconnect => "disconnect",
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(Self::Block),
            "drop-message" => Ok(Self::DropMessage),
            "disconnect" => Ok(Self::Disconnect),
            other => Err(format!(
                "unknown overflow policy '{}' (expected block, drop-message or disconnect)",
                other
            )),
        }
    }
}
