mod cors;
pub use cors::cors_layer;

mod shutdown_signal;
pub use shutdown_signal::shutdown_signal;

mod state;
pub use state::AppState;
