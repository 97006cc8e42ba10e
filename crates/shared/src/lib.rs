mod error;
pub use error::{AppError, ErrorBody, ErrorKind};

mod env;
pub use env::{AppEnv, DEFAULT_BASE_URL, Variant};

mod message;
pub use message::{ChatRequest, ChatResponse, Message, MessageRole, PetContext};
