//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Inference clients (Bedrock runtime over HTTP, in-process mock)
//! - Configuration, dependency wiring and CLI controllers

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
