mod generator;
pub use generator::{TextGenerator, Turn, TurnRole};

mod generate_text;
pub use generate_text::OpenAiGenerator;
