mod chat_session;
mod generate_answer;

pub use chat_session::*;
pub use generate_answer::*;
