use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::Database;

/// List-valued settings stored per guild.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    Topics,
}

impl TextField {
    /// Backing column in `guild_settings`.
    fn column(self) -> &'static str {
        match self {
            TextField::Topics => "topics",
        }
    }
}

/// Read/write access to per-guild configuration.
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Ensure a settings record exists for `guild_id`.
    async fn configure(&self, guild_id: u64) -> anyhow::Result<()>;

    /// Return the values of `field`, or an empty list when unset.
    async fn get_text(&self, guild_id: u64, field: TextField) -> anyhow::Result<Vec<String>>;

    /// Replace the values of `field`.
    async fn set_text(
        &self,
        guild_id: u64,
        field: TextField,
        values: Vec<String>,
    ) -> anyhow::Result<()>;
}

/// PostgreSQL-backed settings.
#[derive(Clone)]
pub struct PgSettings {
    db: Database,
}

impl PgSettings {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsService for PgSettings {
    async fn configure(&self, guild_id: u64) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO guild_settings (guild_id) VALUES ($1) ON CONFLICT (guild_id) DO NOTHING")
            .bind(guild_id as i64)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    async fn get_text(&self, guild_id: u64, field: TextField) -> anyhow::Result<Vec<String>> {
        let sql = format!(
            "SELECT {} FROM guild_settings WHERE guild_id = $1",
            field.column()
        );

        let values = sqlx::query_scalar::<_, Vec<String>>(&sql)
            .bind(guild_id as i64)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(values.unwrap_or_default())
    }

    async fn set_text(
        &self,
        guild_id: u64,
        field: TextField,
        values: Vec<String>,
    ) -> anyhow::Result<()> {
        let column = field.column();
        let sql = format!(
            "INSERT INTO guild_settings (guild_id, {column}, updated_at) VALUES ($1, $2, now()) \
             ON CONFLICT (guild_id) DO UPDATE SET {column} = EXCLUDED.{column}, updated_at = now()"
        );

        debug!(guild_id, field = column, count = values.len(), "updating guild setting");

        sqlx::query(&sql)
            .bind(guild_id as i64)
            .bind(values)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }
}

/// In-process settings, used when no database is configured.
#[derive(Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<(u64, TextField), Vec<String>>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsService for MemorySettings {
    async fn configure(&self, _guild_id: u64) -> anyhow::Result<()> {
        Ok(())
    }

    async fn get_text(&self, guild_id: u64, field: TextField) -> anyhow::Result<Vec<String>> {
        let store = self.values.read().await;
        Ok(store.get(&(guild_id, field)).cloned().unwrap_or_default())
    }

    async fn set_text(
        &self,
        guild_id: u64,
        field: TextField,
        values: Vec<String>,
    ) -> anyhow::Result<()> {
        self.values.write().await.insert((guild_id, field), values);
        Ok(())
    }
}
