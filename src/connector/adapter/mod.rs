mod bedrock_client;
mod mock_inference_client;

pub use bedrock_client::*;
pub use mock_inference_client::*;
