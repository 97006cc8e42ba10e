use tokio::signal;

/// Resolves on Ctrl+C or SIGTERM so in-flight chat requests can finish.
///
/// # Panics
///
/// Panics if a signal handler fails to install.
pub async fn shutdown_signal() {
  let interrupt = async {
    signal::ctrl_c()
      .await
      .expect("failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("failed to install SIGTERM handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  let received = tokio::select! {
    () = interrupt => "interrupt",
    () = terminate => "terminate",
  };
  tracing::info!(signal = received, "shutting down");
}
