use anyhow::anyhow;
use async_openai::{
  Client,
  config::OpenAIConfig,
  types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestMessage,
    ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
  },
};
use async_trait::async_trait;
use pawguide_shared::{AppEnv, AppError};

use crate::{TextGenerator, Turn, TurnRole};

/// Talks to any OpenAI-compatible chat completion endpoint. By default that is
/// the Gemini compatibility layer.
#[derive(Clone)]
pub struct OpenAiGenerator {
  client: Client<OpenAIConfig>,
  model: String,
}

impl OpenAiGenerator {
  pub fn new(api_key: &str, api_base: &str, model: impl Into<String>) -> Self {
    let config = OpenAIConfig::new()
      .with_api_key(api_key)
      .with_api_base(api_base);

    Self {
      client: Client::with_config(config),
      model: model.into(),
    }
  }

  pub fn from_env(env: &AppEnv) -> Self {
    Self::new(&env.gemini_api_key, &env.gemini_base_url, env.model.clone())
  }
}

fn to_request_message(turn: &Turn) -> ChatCompletionRequestMessage {
  match turn.role {
    TurnRole::User => ChatCompletionRequestUserMessage::from(turn.text.as_str()).into(),
    TurnRole::Model => ChatCompletionRequestAssistantMessage::from(turn.text.as_str()).into(),
  }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
  async fn generate(&self, history: &[Turn], latest_query: &str) -> Result<String, AppError> {
    let messages = history
      .iter()
      .map(to_request_message)
      .chain(std::iter::once(
        ChatCompletionRequestUserMessage::from(latest_query).into(),
      ))
      .collect::<Vec<ChatCompletionRequestMessage>>();

    let request = CreateChatCompletionRequestArgs::default()
      .model(&self.model)
      .messages(messages)
      .build()
      .map_err(AppError::upstream)?;

    tracing::debug!(model = %self.model, turns = history.len() + 1, "sending chat completion");

    self
      .client
      .chat()
      .create(request)
      .await
      .map_err(AppError::upstream)?
      .choices
      .into_iter()
      .filter_map(|c| c.message.content)
      .filter(|content| !content.trim().is_empty())
      .last()
      .ok_or_else(|| AppError::upstream(anyhow!("empty message content")))
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
  use pawguide_shared::ErrorKind;
  use serde_json::{Value, json};
  use tokio::net::TcpListener;

  use super::*;

  #[derive(Clone)]
  struct MockCompletions {
    status: StatusCode,
    body: Value,
    requests: Arc<Mutex<Vec<Value>>>,
  }

  async fn completions(
    State(mock): State<MockCompletions>,
    Json(request): Json<Value>,
  ) -> (StatusCode, Json<Value>) {
    mock.requests.lock().unwrap().push(request);
    (mock.status, Json(mock.body))
  }

  fn completion(content: Option<&str>) -> Value {
    json!({
      "id": "chatcmpl-1",
      "object": "chat.completion",
      "created": 1_700_000_000,
      "model": "gemini-1.5-flash",
      "choices": [{
        "index": 0,
        "message": { "role": "assistant", "content": content },
        "finish_reason": "stop"
      }]
    })
  }

  /// Serve `/chat/completions` locally and return a generator pointed at it.
  async fn spawn_mock(status: StatusCode, body: Value) -> (OpenAiGenerator, Arc<Mutex<Vec<Value>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let mock = MockCompletions {
      status,
      body,
      requests: requests.clone(),
    };
    let app = Router::new()
      .route("/chat/completions", post(completions))
      .with_state(mock);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });

    let generator = OpenAiGenerator::new("test-key", &format!("http://{addr}"), "gemini-1.5-flash");
    (generator, requests)
  }

  #[tokio::test]
  async fn sends_history_then_query_with_mapped_roles() {
    let (generator, requests) =
      spawn_mock(StatusCode::OK, completion(Some("Feed twice a day."))).await;

    let history = [
      Turn::model("You are PawGuide."),
      Turn::user("My puppy is 3 months old"),
      Turn::model("Congratulations!"),
    ];
    let reply = generator
      .generate(&history, "How often should I feed him?")
      .await
      .unwrap();
    assert_eq!(reply, "Feed twice a day.");

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["model"], "gemini-1.5-flash");
    let sent: Vec<(String, String)> = requests[0]["messages"]
      .as_array()
      .unwrap()
      .iter()
      .map(|m| {
        (
          m["role"].as_str().unwrap().to_owned(),
          m["content"].as_str().unwrap().to_owned(),
        )
      })
      .collect();
    assert_eq!(
      sent,
      vec![
        ("assistant".to_owned(), "You are PawGuide.".to_owned()),
        ("user".to_owned(), "My puppy is 3 months old".to_owned()),
        ("assistant".to_owned(), "Congratulations!".to_owned()),
        ("user".to_owned(), "How often should I feed him?".to_owned()),
      ]
    );
  }

  #[tokio::test]
  async fn api_error_is_upstream() {
    let (generator, _) = spawn_mock(
      StatusCode::UNAUTHORIZED,
      json!({
        "error": {
          "message": "API key not valid",
          "type": "invalid_request_error",
          "param": null,
          "code": null
        }
      }),
    )
    .await;

    let err = generator.generate(&[], "dog?").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
  }

  #[tokio::test]
  async fn empty_or_absent_content_is_upstream() {
    for content in [Some(""), Some("  \n"), None] {
      let (generator, _) = spawn_mock(StatusCode::OK, completion(content)).await;
      let err = generator.generate(&[], "dog?").await.unwrap_err();
      assert_eq!(err.kind(), ErrorKind::Upstream);
      assert!(err.detail().contains("empty message content"));
    }
  }
}
