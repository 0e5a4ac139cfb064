//! Change notification: synchronous in-process publish/subscribe.

pub mod bus;
pub mod in_memory_bus;

pub use bus::{ChangeNotifier, Listener, Subscription};
pub use in_memory_bus::InMemoryNotifier;
