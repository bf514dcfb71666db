use std::sync::Arc;

use twilight_http::Client;

use topic_database::SettingsService;
use topic_utils::pagination::{PaginationState, SessionStore};

/// Bot configuration loaded from the environment.
pub mod config;

pub use config::{BotConfig, ConfigError};

/// Session store holding each user's topic pagination state.
pub type TopicSessions = dyn SessionStore<PaginationState<String>>;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub settings: Arc<dyn SettingsService>,
    pub sessions: Arc<TopicSessions>,
    pub config: Arc<BotConfig>,
}

impl Context {
    /// Create a new application context.
    pub fn new(
        http: Arc<Client>,
        settings: Arc<dyn SettingsService>,
        sessions: Arc<TopicSessions>,
        config: Arc<BotConfig>,
    ) -> Self {
        Self {
            http,
            settings,
            sessions,
            config,
        }
    }
}
