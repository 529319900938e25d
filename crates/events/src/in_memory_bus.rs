//! In-process change feed over unbounded tokio channels.

use std::sync::Mutex;

use tokio::sync::mpsc::{self, UnboundedSender};

use crate::bus::{EventBus, Subscription};

#[derive(Debug, thiserror::Error)]
pub enum InMemoryBusError {
    #[error("subscriber list lock poisoned")]
    Poisoned,
}

type Filter<M> = Box<dyn Fn(&M) -> bool + Send + Sync>;

struct Subscriber<M> {
    tx: UnboundedSender<M>,
    filter: Option<Filter<M>>,
}

impl<M> Subscriber<M> {
    fn accepts(&self, message: &M) -> bool {
        self.filter.as_ref().is_none_or(|accept| accept(message))
    }
}

/// Fan-out feed. Publishing never blocks and never awaits.
pub struct InMemoryEventBus<M> {
    subscribers: Mutex<Vec<Subscriber<M>>>,
}

impl<M> core::fmt::Debug for InMemoryEventBus<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryEventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscriptions still registered; closed ones go on the next publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|subs| subs.len()).unwrap_or(0)
    }

    /// A subscription that only receives messages `accept` lets through.
    pub fn subscribe_where(&self, accept: impl Fn(&M) -> bool + Send + Sync + 'static) -> Subscription<M> {
        self.register(Some(Box::new(accept)))
    }

    fn register(&self, filter: Option<Filter<M>>) -> Subscription<M> {
        let (tx, rx) = mpsc::unbounded_channel();

        // A poisoned lock still yields a subscription; it just stays silent.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(Subscriber { tx, filter });
        }

        Subscription::new(rx)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<usize, Self::Error> {
        let mut subs = self.subscribers.lock().map_err(|_| InMemoryBusError::Poisoned)?;

        subs.retain(|sub| !sub.tx.is_closed());
        let mut delivered = 0;
        for sub in subs.iter().filter(|sub| sub.accepts(&message)) {
            if sub.tx.send(message.clone()).is_ok() {
                delivered += 1;
            }
        }
        Ok(delivered)
    }

    fn subscribe(&self) -> Subscription<M> {
        self.register(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_gets_every_message() {
        let bus = InMemoryEventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        assert_eq!(bus.publish(1u32).unwrap(), 2);
        bus.publish(2u32).unwrap();

        assert_eq!(a.drain(), vec![1, 2]);
        assert_eq!(b.drain(), vec![1, 2]);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let bus = InMemoryEventBus::new();
        let mut keep = bus.subscribe();
        drop(bus.subscribe());

        assert_eq!(bus.publish("x").unwrap(), 1);

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(keep.try_recv(), Some("x"));
    }

    #[test]
    fn filtered_subscriptions_skip_other_messages() {
        let bus = InMemoryEventBus::new();
        let mut evens = bus.subscribe_where(|n: &u32| n % 2 == 0);

        for n in 1..=4u32 {
            bus.publish(n).unwrap();
        }

        assert_eq!(evens.drain(), vec![2, 4]);
    }

    #[tokio::test]
    async fn recv_waits_for_the_next_message() {
        let bus = std::sync::Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe();

        let publisher = bus.clone();
        tokio::spawn(async move {
            publisher.publish("ready").unwrap();
        });

        assert_eq!(sub.recv().await, Some("ready"));
    }
}
