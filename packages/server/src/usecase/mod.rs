//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、`MailboxDirectory` を通じて Domain 層を操作します。

pub mod connect_member;
pub mod disconnect_member;
pub mod error;
pub mod list_rooms;
pub mod send_message;

pub use connect_member::ConnectMemberUseCase;
pub use disconnect_member::DisconnectMemberUseCase;
pub use error::ConnectError;
pub use list_rooms::ListRoomsUseCase;
pub use send_message::SendMessageUseCase;
