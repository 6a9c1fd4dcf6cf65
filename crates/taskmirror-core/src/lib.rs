//! Taskmirror Core — shared domain types and abstractions.
//!
//! This crate defines the event data model and the traits the consumer loop
//! depends on. It contains no infrastructure code.

pub mod error;
pub mod event;
pub mod message;
pub mod store;
pub mod transport;
