// Domain module: instances, covers and the engine contract

pub mod cover;
pub mod engine_service;
pub mod error;
pub mod instance;
pub mod models;
pub mod value_objects;

pub use cover::*;
pub use engine_service::{EngineError, MipEngine};
pub use error::{Result, SetCoverError};
pub use instance::*;
pub use models::*;
pub use value_objects::*;
