//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{MailboxDirectory, RoomSnapshot};

/// ルーム一覧取得のユースケース
pub struct ListRoomsUseCase {
    directory: Arc<dyn MailboxDirectory>,
}

impl ListRoomsUseCase {
    pub fn new(directory: Arc<dyn MailboxDirectory>) -> Self {
        Self { directory }
    }

    /// 稼働中のルームをキー順に返す
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        self.directory.snapshot().await
    }
}
