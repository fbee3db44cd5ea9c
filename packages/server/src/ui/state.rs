//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::Authenticator,
    usecase::{ConnectMemberUseCase, DisconnectMemberUseCase, ListRoomsUseCase, SendMessageUseCase},
};

/// Shared application state
pub struct AppState {
    /// ConnectMemberUseCase（接続のユースケース）
    pub connect_member_usecase: Arc<ConnectMemberUseCase>,
    /// DisconnectMemberUseCase（切断のユースケース）
    pub disconnect_member_usecase: Arc<DisconnectMemberUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// ListRoomsUseCase（ルーム一覧取得のユースケース）
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    /// Authenticator（アップグレード時の認証）
    pub authenticator: Arc<dyn Authenticator>,
    /// 接続ごとの送信キューの容量
    pub outbox_capacity: usize,
}
