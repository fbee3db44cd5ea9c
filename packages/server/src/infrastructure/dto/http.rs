//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Member entry in a room listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDto {
    pub connection_id: String,
    /// RFC 3339, UTC
    pub connected_at: String,
}

/// Room entry in `/api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub key: String,
    pub identity: String,
    pub members: Vec<MemberDto>,
}
