use async_trait::async_trait;
use pawguide_shared::{AppError, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
  User,
  Model,
}

/// One entry of the history handed to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
  pub role: TurnRole,
  pub text: String,
}

impl Turn {
  pub fn user(text: impl Into<String>) -> Self {
    Self {
      role: TurnRole::User,
      text: text.into(),
    }
  }

  pub fn model(text: impl Into<String>) -> Self {
    Self {
      role: TurnRole::Model,
      text: text.into(),
    }
  }
}

impl From<&Message> for Turn {
  /// `user` stays `user`; every other role is spoken by the model.
  fn from(message: &Message) -> Self {
    if message.is_user() {
      Self::user(message.content.clone())
    } else {
      Self::model(message.content.clone())
    }
  }
}

/// A hosted generative-language model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
  /// Continue `history` with `latest_query` and return the model's reply.
  ///
  /// Implementations report every transport, quota or model failure as an
  /// upstream [`AppError`].
  async fn generate(&self, history: &[Turn], latest_query: &str) -> Result<String, AppError>;
}
