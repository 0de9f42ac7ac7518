//! # Application Layer
//!
//! Use cases orchestrating the domain formatter/normalizer around an
//! [`InferenceClient`].

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
