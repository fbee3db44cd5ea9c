//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 送信者は常に認証済みの Identity であること
//! - 宛先に接続が無い場合もエラーにならないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：宛先ルームへの配信
//! - エッジケース：接続の無い宛先（配信されずに破棄）

use std::sync::Arc;

use crate::domain::{Delivery, Envelope, MailboxDirectory};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// MailboxDirectory（ルームディレクトリの抽象化）
    directory: Arc<dyn MailboxDirectory>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(directory: Arc<dyn MailboxDirectory>) -> Self {
        Self { directory }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `envelope` - 送信元が認証済み Identity で埋められた Envelope
    ///
    /// # Returns
    ///
    /// 配信結果。宛先にルームが無ければ `Delivery::NoRecipient`（エラーではない）
    pub async fn execute(&self, envelope: Envelope) -> Delivery {
        let (from, to) = (envelope.from.clone(), envelope.to.clone());

        let delivery = self.directory.deliver(envelope).await;
        match delivery {
            Delivery::Queued => tracing::debug!("Routed message from '{}' to '{}'", from, to),
            Delivery::NoRecipient => {
                tracing::debug!("'{}' has no live connection; message from '{}' dropped", to, from)
            }
        }
        delivery
    }
}
