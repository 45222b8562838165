//! Named publish/subscribe events for applications embedding the engine.

pub mod aggregator;
pub mod handler;

pub use aggregator::{EventAggregator, HandlerId};
pub use handler::EventHandler;
