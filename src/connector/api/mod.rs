pub mod container;
pub mod controller;
pub mod router;
mod settings;

pub use container::{Container, ContainerConfig};
pub use controller::{AskController, ChatController, InfoController};
pub use router::Router;
pub use settings::*;
