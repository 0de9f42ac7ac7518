mod chat_message;
mod context;
mod generation_params;
mod model_family;
mod request_body;

pub use chat_message::*;
pub use context::*;
pub use generation_params::*;
pub use model_family::*;
pub use request_body::*;
