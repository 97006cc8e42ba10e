use pawguide_core::ChatService;

#[derive(Clone)]
pub struct AppState {
  pub chat: ChatService,
}

impl AppState {
  #[must_use]
  pub const fn new(chat: ChatService) -> Self {
    Self { chat }
  }
}
