mod relevance;
pub use relevance::{is_on_topic, keywords};

mod prompt;
pub use prompt::{AssembledPrompt, assemble_prompt, persona_instruction};

mod markdown;
pub use markdown::format_markdown;

mod chat;
pub use chat::{ChatService, latest_user_message, refusal};
