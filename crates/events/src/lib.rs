//! `brandhub-events`: in-process change feed.
//!
//! Entity stores and the active-brand context publish [`ChangeEvent`]s here;
//! views subscribe instead of polling.

pub mod bus;
pub mod change;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use change::{ChangeEvent, ChangeFeed};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
