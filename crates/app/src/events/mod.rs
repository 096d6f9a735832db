//! Integration messages: the bus, the producer service and consumers.

pub mod bus;
pub mod consumers;
mod errors;
mod messages;
mod service;

pub use bus::{
    BusKind, BusSettings, DEFAULT_CHANNEL, InMemoryMessageBus, MessageBus, PgMessageBus,
};
pub use consumers::{AddToBook, Consumer, ConsumerError, ConsumerHost};
pub use errors::*;
pub use messages::*;
pub use service::*;
