use pawguide_server::server;
use pawguide_shared::{AppEnv, AppError};
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "pawguide=debug,pawguide_server=debug,pawguide_core=debug,tower_http=info".into()
      }),
    )
    .with(tracing_subscriber::fmt::layer())
    .with(ErrorLayer::default())
    .init();

  let env = AppEnv::from_env()?;

  server(&env).await
}
