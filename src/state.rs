use crate::{config::Config, core::GameManager};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// All board mutations go through this one lock
    pub game_manager: Arc<RwLock<GameManager>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            game_manager: Arc::new(RwLock::new(GameManager::with_palette(
                config.palette.clone(),
            ))),
            config: Arc::new(config),
        }
    }
}
