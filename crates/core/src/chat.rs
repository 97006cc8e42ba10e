use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use pawguide_ai::TextGenerator;
use pawguide_shared::{AppEnv, AppError, ChatRequest, ChatResponse, Message, Variant};
use tracing::{debug, error, info, warn};

use crate::{assemble_prompt, format_markdown, is_on_topic};

#[must_use]
pub const fn refusal(variant: Variant) -> &'static str {
  match variant {
    Variant::Guided => {
      "I'm a pet assistant designed to help with pet-related questions. \
       Could you please ask me something about pets, pet care, or animal behavior?"
    }
    Variant::Inline => {
      "I'm sorry, I can only answer questions related to pets and animals. \
       Please ask me something about pet care, behavior, training, or other pet-related topics."
    }
  }
}

/// Index and message of the latest user turn.
#[must_use]
pub fn latest_user_message(messages: &[Message]) -> Option<(usize, &Message)> {
  messages.iter().enumerate().rev().find(|(_, m)| m.is_user())
}

/// Answers one chat request: classify, short-circuit or call the model, format.
#[derive(Clone)]
pub struct ChatService {
  variant: Variant,
  generator: Arc<dyn TextGenerator>,
  upstream_timeout: Duration,
}

impl ChatService {
  pub fn new(
    variant: Variant,
    generator: Arc<dyn TextGenerator>,
    upstream_timeout: Duration,
  ) -> Self {
    Self {
      variant,
      generator,
      upstream_timeout,
    }
  }

  pub fn from_env(env: &AppEnv, generator: Arc<dyn TextGenerator>) -> Self {
    Self::new(env.variant, generator, env.upstream_timeout)
  }

  #[must_use]
  pub const fn variant(&self) -> Variant {
    self.variant
  }

  /// # Errors
  ///
  /// - [`ErrorKind::BadRequest`](pawguide_shared::ErrorKind::BadRequest) when no message has the user role.
  /// - [`ErrorKind::Upstream`](pawguide_shared::ErrorKind::Upstream) when the model call fails or times out.
  pub async fn respond(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
    debug!(messages = request.messages.len(), "received chat request");

    let Some((latest, message)) = latest_user_message(&request.messages) else {
      warn!("no user message found in request");
      return Err(AppError::bad_request(anyhow!("No user message found")));
    };

    if !is_on_topic(self.variant, &message.content) {
      info!("query is not pet-related, returning refusal");
      return Ok(ChatResponse {
        text: refusal(self.variant).to_owned(),
      });
    }

    if self.variant == Variant::Inline && request.pet_context.is_some() {
      debug!("pet context is ignored by the inline variant");
    }

    let prompt = assemble_prompt(
      self.variant,
      &request.messages,
      latest,
      request.pet_context.as_ref(),
    );
    debug!(turns = prompt.history.len(), "prompt assembled");

    let generated = tokio::time::timeout(
      self.upstream_timeout,
      self.generator.generate(&prompt.history, &prompt.query),
    )
    .await
    .map_err(|_| {
      AppError::upstream(anyhow!(
        "model did not respond within {}s",
        self.upstream_timeout.as_secs_f32()
      ))
    })
    .and_then(|result| result);

    let raw = generated.inspect_err(|err| error!("error generating response from model: {err}"))?;

    debug!("formatting response with markdown");
    Ok(ChatResponse {
      text: format_markdown(&raw),
    })
  }
}
