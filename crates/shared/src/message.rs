use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
  User,
  Assistant,
  /// Any other role string a client sends. Treated as non-user.
  #[serde(other)]
  Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Message {
  pub role: MessageRole,
  pub content: String,
}

impl Message {
  pub fn user(content: impl Into<String>) -> Self {
    Self {
      role: MessageRole::User,
      content: content.into(),
    }
  }

  pub fn assistant(content: impl Into<String>) -> Self {
    Self {
      role: MessageRole::Assistant,
      content: content.into(),
    }
  }

  pub const fn is_user(&self) -> bool {
    matches!(self.role, MessageRole::User)
  }
}

/// Details about the user's pet, used to enrich the persona prompt.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct PetContext {
  pub name: String,
  /// The frontend sends this as `type`.
  #[serde(alias = "type")]
  pub species: String,
  pub breed: Option<String>,
  pub age: Option<String>,
  pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ChatRequest {
  pub messages: Vec<Message>,
  #[serde(rename = "petContext", default, skip_serializing_if = "Option::is_none")]
  pub pet_context: Option<PetContext>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct ChatResponse {
  pub text: String,
}
