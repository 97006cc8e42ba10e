use axum::{
  Json, Router,
  routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::utils::AppState;

mod chat;

#[derive(OpenApi)]
#[openapi(
  info(
    title = "PawGuide API",
    description = "Backend for the PawGuide pet assistant"
  ),
  paths(chat::chat, crate::server::status),
  components(schemas(
    crate::server::Status,
    pawguide_shared::ChatRequest,
    pawguide_shared::ChatResponse,
    pawguide_shared::ErrorBody,
    pawguide_shared::Message,
    pawguide_shared::MessageRole,
    pawguide_shared::PetContext,
  ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
  Json(ApiDoc::openapi())
}

pub fn app() -> Router<AppState> {
  Router::new()
    .route("/api/chat", post(chat::chat))
    .route("/openapi.json", get(openapi_json))
    .merge(Scalar::with_url("/openapi/", ApiDoc::openapi()))
}
