use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use pawguide_ai::OpenAiGenerator;
use pawguide_core::ChatService;
use pawguide_shared::{AppEnv, AppError};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use utoipa::ToSchema;

use crate::{
  api,
  utils::{AppState, cors_layer, shutdown_signal},
};

#[derive(Serialize, ToSchema)]
pub struct Status {
  pub status: String,
  pub version: String,
  pub variant: String,
}

/// Service status
#[utoipa::path(
  get,
  path = "/",
  responses((status = 200, description = "Service is running", body = Status))
)]
#[axum::debug_handler]
pub async fn status(State(state): State<AppState>) -> Json<Status> {
  Json(Status {
    status: "PawGuide API is running".to_owned(),
    version: env!("CARGO_PKG_VERSION").to_owned(),
    variant: state.chat.variant().to_string(),
  })
}

/// Build the full router around an already configured chat service.
pub fn app(chat: ChatService, cors_origins: Option<&[String]>) -> Router {
  Router::new()
    .route("/", get(status))
    .merge(api::app())
    .layer(cors_layer(cors_origins))
    .layer(TraceLayer::new_for_http())
    .with_state(AppState::new(chat))
}

pub async fn server(env: &AppEnv) -> Result<(), AppError> {
  let generator = Arc::new(OpenAiGenerator::from_env(env));
  let chat = ChatService::from_env(env, generator);

  let app = app(chat, env.cors_origins.as_deref());

  let listener = TcpListener::bind(env.listen_addr).await?;

  tracing::info!(
    variant = %env.variant,
    model = %env.model,
    "server started at http://{}",
    env.listen_addr
  );

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}
