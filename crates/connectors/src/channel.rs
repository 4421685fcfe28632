use crate::error::ChannelError;
use async_trait::async_trait;
use model::records::event::Event;

/// Upstream buffered channel with per-step transactions.
///
/// One transaction brackets each drain: `begin`, any number of `take` calls,
/// exactly one of `commit` or `rollback`, then `close`. `take` never blocks;
/// `None` means no event is available right now, not end-of-stream. Events
/// taken inside a rolled-back transaction are redelivered on the next one.
#[async_trait]
pub trait EventChannel: Send {
    async fn begin(&mut self) -> Result<(), ChannelError>;

    async fn take(&mut self) -> Result<Option<Event>, ChannelError>;

    async fn commit(&mut self) -> Result<(), ChannelError>;

    async fn rollback(&mut self) -> Result<(), ChannelError>;

    async fn close(&mut self) -> Result<(), ChannelError>;
}
