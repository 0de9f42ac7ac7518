//! Pure request formatting and response normalization.

mod request_formatter;
mod response_normalizer;

pub use request_formatter::*;
pub use response_normalizer::*;
