//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::RoomError;

/// 接続処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// 自分のルームに参加できなかった
    #[error("failed to join own room: {0}")]
    RoomUnavailable(#[from] RoomError),
}
