use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Allow any origin unless an explicit list is configured.
pub fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
  let origins: Vec<HeaderValue> = origins
    .unwrap_or_default()
    .iter()
    .filter_map(|s| s.parse().ok())
    .collect();

  let layer = CorsLayer::new().allow_headers(Any).allow_methods(Any);
  if origins.is_empty() {
    layer.allow_origin(Any)
  } else {
    layer.allow_origin(origins)
  }
}
