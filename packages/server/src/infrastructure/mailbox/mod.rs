//! Actor-based mailbox implementation.
//!
//! ## Structure
//!
//! - `room`: one tokio task per room owning its membership, fed by an ordered
//!   event queue (join / leave / deliver / snapshot)
//! - `registry`: the process-wide key → room directory, implementing
//!   `MailboxDirectory`
//! - `policy`: what a room does when a member's outbound queue is full
//!
//! Every event submission happens while holding the registry lock, and a room
//! retires only under that same lock after observing an empty queue. A join
//! therefore never lands in a room that is about to exit.

mod policy;
mod registry;
mod room;

pub use policy::OverflowPolicy;
pub use registry::RoomRegistry;
pub use room::RoomHandle;

#[cfg(test)]
pub(crate) mod test_support;
