//! Core types shared by every fixmark crate: errors, configuration, events and
//! tracing setup.

pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;
