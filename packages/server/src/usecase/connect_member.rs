//! UseCase: 接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectMemberUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 接続は必ず自分自身の Identity のルームに参加する
//! - ルームに参加できない場合はエラーとして UI 層に返す
//!
//! ### どのような状況を想定しているか
//! - 正常系：自分のルームへの参加
//! - 異常系：ルームが閉じている

use std::sync::Arc;

use crate::domain::{Identity, MailboxDirectory, Member, Membership, Outbox, Timestamp};

use super::error::ConnectError;

/// 接続のユースケース
pub struct ConnectMemberUseCase {
    /// MailboxDirectory（ルームディレクトリの抽象化）
    directory: Arc<dyn MailboxDirectory>,
}

impl ConnectMemberUseCase {
    /// 新しい ConnectMemberUseCase を作成
    pub fn new(directory: Arc<dyn MailboxDirectory>) -> Self {
        Self { directory }
    }

    /// 接続を自分のルームに参加させる
    ///
    /// # Arguments
    ///
    /// * `identity` - 認証済みの Identity（Domain Model）
    /// * `outbox` - この接続への送信キュー
    ///
    /// # Returns
    ///
    /// * `Ok(Membership)` - 参加したルームの受領証（切断時の leave に使う）
    /// * `Err(ConnectError)` - 参加失敗
    pub async fn execute(
        &self,
        identity: Identity,
        outbox: Outbox,
    ) -> Result<Membership, ConnectError> {
        let member = Member::new(identity, outbox, Timestamp::now());
        let membership = self.directory.join(member).await?;
        Ok(membership)
    }
}
