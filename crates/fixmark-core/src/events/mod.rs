//! Event system for fixmark.
//! Handler trait with no-op defaults, synchronous dispatcher.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::FixmarkEventHandler;
pub use types::*;
