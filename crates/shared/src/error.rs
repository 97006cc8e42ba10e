use std::{
  backtrace::{Backtrace, BacktraceStatus},
  fmt::Display,
};

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The request carried no user message.
  BadRequest,
  /// The external model call failed: network, quota, timeout or an empty reply.
  Upstream,
  /// Anything else that went wrong while handling the request.
  Internal,
}

impl ErrorKind {
  #[must_use]
  pub const fn status_code(self) -> StatusCode {
    match self {
      Self::BadRequest => StatusCode::BAD_REQUEST,
      Self::Upstream | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  const fn detail_prefix(self) -> &'static str {
    match self {
      Self::BadRequest => "",
      Self::Upstream => "Error generating response: ",
      Self::Internal => "Unexpected error: ",
    }
  }
}

#[derive(Debug)]
pub struct AppError {
  err: anyhow::Error,
  kind: ErrorKind,
}

/// Error body returned to HTTP callers.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
  pub detail: String,
}

impl AppError {
  /// Create with 500 status
  pub fn new<E: Into<anyhow::Error>>(err: E) -> Self {
    Self::with_kind(ErrorKind::Internal, err)
  }

  pub fn with_kind<E: Into<anyhow::Error>>(kind: ErrorKind, err: E) -> Self {
    Self {
      err: err.into(),
      kind,
    }
  }

  pub fn bad_request<E: Into<anyhow::Error>>(err: E) -> Self {
    Self::with_kind(ErrorKind::BadRequest, err)
  }

  pub fn upstream<E: Into<anyhow::Error>>(err: E) -> Self {
    Self::with_kind(ErrorKind::Upstream, err)
  }

  #[must_use]
  pub const fn kind(&self) -> ErrorKind {
    self.kind
  }

  #[must_use]
  pub const fn status_code(&self) -> StatusCode {
    self.kind.status_code()
  }

  /// Get backtrace from anyhow (requires `RUST_BACKTRACE=1` to capture)
  pub fn backtrace(&self) -> &Backtrace {
    self.err.backtrace()
  }

  /// The caller-facing detail string, without any backtrace.
  #[must_use]
  pub fn detail(&self) -> String {
    format!("{}{:#}", self.kind.detail_prefix(), self.err)
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let detail = self.detail();
    let detail = if cfg!(debug_assertions) && self.kind != ErrorKind::BadRequest {
      let bt = self.err.backtrace();
      if bt.status() == BacktraceStatus::Captured {
        format!("{detail}\nBacktrace:\n{bt}")
      } else {
        format!("{detail}\n(hint: set RUST_BACKTRACE=1 to enable backtrace)")
      }
    } else {
      detail
    };
    (self.status_code(), Json(ErrorBody { detail })).into_response()
  }
}

impl Display for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}] {:#}", self.status_code(), self.err)
  }
}

impl<E> From<E> for AppError
where
  E: Into<anyhow::Error>,
{
  fn from(err: E) -> Self {
    Self::new(err)
  }
}
