use std::{env, net::SocketAddr, time::Duration};

use anyhow::{Context, anyhow};
use strum::{Display, EnumString};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Which flavour of the assistant this process serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Variant {
  /// Short keyword list, pet context, persona sent as the first history turn.
  #[default]
  Guided,
  /// Long keyword list plus word-boundary pattern, persona prepended to the query.
  Inline,
}

impl Variant {
  #[must_use]
  pub const fn default_model(self) -> &'static str {
    match self {
      Self::Guided => "gemini-1.5-flash",
      Self::Inline => "gemini-1.5-pro",
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppEnv {
  pub gemini_api_key: String,
  pub gemini_base_url: String,
  pub model: String,
  pub variant: Variant,
  pub listen_addr: SocketAddr,
  pub upstream_timeout: Duration,
  /// `None` allows any origin.
  pub cors_origins: Option<Vec<String>>,
}

impl AppEnv {
  /// Read configuration from the process environment.
  ///
  /// # Errors
  ///
  /// Fails when `GEMINI_API_KEY` is missing or any optional setting cannot be parsed.
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build configuration from an arbitrary key lookup.
  ///
  /// # Errors
  ///
  /// See [`AppEnv::from_env`].
  pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let gemini_api_key =
      get("GEMINI_API_KEY").ok_or_else(|| anyhow!("GEMINI_API_KEY environment variable not set"))?;

    let variant = get("PAWGUIDE_VARIANT")
      .map(|v| {
        v.trim()
          .parse::<Variant>()
          .with_context(|| format!("PAWGUIDE_VARIANT must be `guided` or `inline`, got `{v}`"))
      })
      .transpose()?
      .unwrap_or_default();

    let listen_addr = get("PAWGUIDE_LISTEN_ADDR")
      .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned())
      .parse::<SocketAddr>()
      .context("PAWGUIDE_LISTEN_ADDR must be a socket address")?;

    let timeout_secs = get("PAWGUIDE_UPSTREAM_TIMEOUT_SECS")
      .map(|v| {
        v.trim()
          .parse::<u64>()
          .with_context(|| format!("PAWGUIDE_UPSTREAM_TIMEOUT_SECS must be whole seconds, got `{v}`"))
          .and_then(|secs| {
            anyhow::ensure!(secs > 0, "PAWGUIDE_UPSTREAM_TIMEOUT_SECS must be at least 1");
            Ok(secs)
          })
      })
      .transpose()?
      .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);

    let cors_origins = get("PAWGUIDE_CORS_ORIGINS").map(|v| {
      v.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect::<Vec<_>>()
    });

    Ok(Self {
      gemini_api_key,
      gemini_base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
      model: get("PAWGUIDE_MODEL").unwrap_or_else(|| variant.default_model().to_owned()),
      variant,
      listen_addr,
      upstream_timeout: Duration::from_secs(timeout_secs),
      cors_origins,
    })
  }
}
