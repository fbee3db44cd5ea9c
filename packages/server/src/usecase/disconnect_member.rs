//! UseCase: 切断処理

use std::sync::Arc;

use crate::domain::{MailboxDirectory, Membership};

/// 切断のユースケース
pub struct DisconnectMemberUseCase {
    /// MailboxDirectory（ルームディレクトリの抽象化）
    directory: Arc<dyn MailboxDirectory>,
}

impl DisconnectMemberUseCase {
    /// 新しい DisconnectMemberUseCase を作成
    pub fn new(directory: Arc<dyn MailboxDirectory>) -> Self {
        Self { directory }
    }

    /// 参加していたルームから退出する
    ///
    /// 接続ごとに 1 回だけ呼び出すこと。ルームが既に破棄されていれば何もしない。
    pub async fn execute(&self, membership: &Membership) {
        self.directory.leave(membership).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, Identity, MockMailboxDirectory, RoomInstanceId, RoomKey};

    #[tokio::test]
    async fn test_disconnect_leaves_recorded_room_instance() {
        // テスト項目: 切断時は参加時に記録したルームインスタンスに対して leave する
        // given (前提条件):
        let alice = Identity::new("alice".to_string()).unwrap();
        let membership = Membership {
            room_key: RoomKey::for_identity(&alice),
            room_instance: RoomInstanceId::generate(),
            connection_id: ConnectionId::generate(),
        };
        let expected = membership.clone();
        let mut directory = MockMailboxDirectory::new();
        directory
            .expect_leave()
            .withf(move |m| *m == expected)
            .times(1)
            .return_const(());
        let usecase = DisconnectMemberUseCase::new(Arc::new(directory));

        // when (操作):
        usecase.execute(&membership).await;

        // then (期待する結果):
        // times(1) is verified when the mock is dropped
    }
}
