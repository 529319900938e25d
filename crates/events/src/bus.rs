//! Change-feed publishing and subscription.
//!
//! Views subscribe to the feed and re-read the stores they render when a
//! relevant change arrives. The feed carries notifications, not data: a
//! subscriber that falls behind only renders stale data until it catches up.
//!
//! Every subscription gets every message it accepts, in publish order per
//! publisher. Subscriptions whose receiver is gone are pruned on publish.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;

/// Receiving end of a change-feed subscription.
///
/// ```ignore
/// let mut tasks = data.subscribe_to("db_tasks");
/// while let Some(change) = tasks.recv().await {
///     render_task_board(&data.tasks.scoped());
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: UnboundedReceiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: UnboundedReceiver<M>) -> Self {
        Self { receiver }
    }

    /// Next message; `None` once the feed is gone and the queue is empty.
    pub async fn recv(&mut self) -> Option<M> {
        self.receiver.recv().await
    }

    /// Next queued message, if any.
    pub fn try_recv(&mut self) -> Option<M> {
        match self.receiver.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Everything currently queued.
    pub fn drain(&mut self) -> Vec<M> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

/// Publish side of a change feed.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    /// Fan `message` out; returns how many subscriptions received it.
    fn publish(&self, message: M) -> Result<usize, Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<usize, Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
