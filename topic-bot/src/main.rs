use std::{sync::Arc, time::Duration};

use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use topic_commands::{handle_interaction, register_commands};
use topic_core::{BotConfig, Context, TopicSessions};
use topic_database::{Database, MemorySettings, PgSettings, SettingsService};
use topic_utils::pagination::{MemorySessionStore, PaginationState};

/// How often expired pagination sessions are swept.
const SESSION_SWEEP_SECS: u64 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();
    let config = Arc::new(BotConfig::from_env()?);

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(config.discord_token.clone()));

    let settings: Arc<dyn SettingsService> = match config.database_url.as_deref() {
        Some(database_url) => {
            let db_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            let db = Database::new(db_pool);
            db.migrate().await?;
            info!("PostgreSQL connection established.");
            Arc::new(PgSettings::new(db))
        }
        None => {
            warn!("DATABASE_URL not set, topics are kept in memory only");
            Arc::new(MemorySettings::new())
        }
    };

    let session_store = MemorySessionStore::<PaginationState<String>>::new(config.session_ttl);
    info!(ttl_secs = session_store.ttl().as_secs(), "pagination sessions kept in memory");
    let sessions: Arc<TopicSessions> = Arc::new(session_store);
    spawn_session_sweeper(Arc::clone(&sessions));

    let ctx = Context::new(Arc::clone(&http), settings, sessions, Arc::clone(&config));

    // Slash commands and their buttons only need guild interactions
    let intents = Intents::GUILDS;

    // A shard is one Gateway WebSocket connection to Discord
    let mut shard = Shard::new(ShardId::new(0, 1), config.discord_token.clone(), intents);

    info!("Topic bot is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(ready) => {
                info!("Topic bot is ready.");
                if let Err(source) = register_commands(&http, ready.application.id).await {
                    error!(?source, "failed to register commands");
                }
            }
            Event::InteractionCreate(interaction) => {
                let interaction_id = interaction.id.get();
                if let Err(source) = handle_interaction(ctx.clone(), interaction).await {
                    error!(?source, interaction_id, "interaction handler failed");
                }
            }
            _ => {} // Ignore unused events
        }
    }

    Ok(())
}

/// Periodically evict expired pagination sessions.
fn spawn_session_sweeper(sessions: Arc<TopicSessions>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(SESSION_SWEEP_SECS));
        loop {
            interval.tick().await;
            let removed = sessions.prune_expired().await;
            if removed > 0 {
                debug!(removed, "pruned expired pagination sessions");
            }
        }
    });
}
