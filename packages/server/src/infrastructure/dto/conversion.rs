//! Conversion logic between DTOs and domain entities.

use thiserror::Error;
use yubin_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    Envelope, Identity, MemberSnapshot, MessageContent, RoomSnapshot, ValueObjectError,
};
use crate::infrastructure::dto::{http, websocket as ws};

// ========================================
// DTO → Domain Entity
// ========================================

/// Why an inbound text frame could not become an [`Envelope`].
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid frame: {0}")]
    Invalid(#[from] ValueObjectError),
}

/// Decode a text frame sent by `from`.
pub fn decode_inbound(text: &str, from: &Identity) -> Result<Envelope, FrameError> {
    let inbound: ws::InboundMessage = serde_json::from_str(text)?;
    Ok(inbound.into_envelope(from.clone())?)
}

impl ws::InboundMessage {
    /// Stamp the frame with the authenticated sender and validate it.
    pub fn into_envelope(self, from: Identity) -> Result<Envelope, ValueObjectError> {
        let to = Identity::new(self.to)?;
        let content = MessageContent::new(self.content)?;
        Ok(Envelope::new(from, to, content))
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Envelope> for ws::OutboundMessage {
    fn from(envelope: Envelope) -> Self {
        Self {
            from: envelope.from.into_string(),
            to: envelope.to.into_string(),
            content: envelope.content.into_string(),
        }
    }
}

impl From<&Envelope> for ws::OutboundMessage {
    fn from(envelope: &Envelope) -> Self {
        Self {
            from: envelope.from.as_str().to_string(),
            to: envelope.to.as_str().to_string(),
            content: envelope.content.as_str().to_string(),
        }
    }
}

impl From<MemberSnapshot> for http::MemberDto {
    fn from(member: MemberSnapshot) -> Self {
        Self {
            connection_id: member.connection_id.to_string(),
            connected_at: timestamp_to_rfc3339(member.connected_at.value()),
        }
    }
}

impl From<RoomSnapshot> for http::RoomSummaryDto {
    fn from(room: RoomSnapshot) -> Self {
        Self {
            identity: room.key.identity().into_string(),
            key: room.key.as_str().to_string(),
            members: room.members.into_iter().map(Into::into).collect(),
        }
    }
}
