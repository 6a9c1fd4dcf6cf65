//! Taskmirror Consumer — the receive, persist, acknowledge loop and its
//! process bootstrap.

pub mod config;
pub mod consumer;
pub mod error;
