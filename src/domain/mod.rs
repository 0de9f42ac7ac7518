//! # Domain Layer
//!
//! Model families, request bodies, and the pure formatting/normalization
//! logic. This layer performs no I/O and is independent of any transport.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
