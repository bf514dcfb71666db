use tracing::info;
use twilight_model::{gateway::payload::incoming::InteractionCreate, guild::Permissions};

use crate::CommandMeta;
use crate::configuration::{MAX_TOPIC_LEN, guild_only_message, permission_denied_message};
use topic_core::Context;
use topic_database::{SettingsService, TextField};
use topic_utils::pagination::respond_ephemeral_message;
use topic_utils::permissions::has_interaction_permission;

pub const META: CommandMeta = CommandMeta {
    name: "add_topic",
    desc: "Add a topic to the configuration",
    usage: "/configuration add_topic <topic>",
};

/// Result of adding a topic to a guild's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddTopicOutcome {
    Added { topic: String, total: usize },
    AlreadyPresent(String),
    Invalid(&'static str),
}

impl AddTopicOutcome {
    /// User-facing reply text.
    pub fn message(&self) -> String {
        match self {
            AddTopicOutcome::Added { topic, total } => {
                format!("Added topic *{topic}*. There are now {total} topics configured.")
            }
            AddTopicOutcome::AlreadyPresent(topic) => {
                format!("The topic *{topic}* is already configured.")
            }
            AddTopicOutcome::Invalid(reason) => (*reason).to_owned(),
        }
    }
}

/// Trim and check a raw topic value.
pub fn normalize_topic(raw: &str) -> Result<String, &'static str> {
    let topic = raw.trim();

    if topic.is_empty() {
        return Err("Topics cannot be empty.");
    }

    if topic.chars().count() > usize::from(MAX_TOPIC_LEN) {
        return Err("Topics can be at most 100 characters long.");
    }

    Ok(topic.to_owned())
}

/// Append `raw` to the guild's topics unless it is already present (case-insensitive).
pub async fn add_topic(
    settings: &dyn SettingsService,
    guild_id: u64,
    raw: &str,
) -> anyhow::Result<AddTopicOutcome> {
    let topic = match normalize_topic(raw) {
        Ok(topic) => topic,
        Err(reason) => return Ok(AddTopicOutcome::Invalid(reason)),
    };

    settings.configure(guild_id).await?;
    let mut topics = settings.get_text(guild_id, TextField::Topics).await?;

    if let Some(existing) = topics
        .iter()
        .find(|existing| existing.to_lowercase() == topic.to_lowercase())
    {
        return Ok(AddTopicOutcome::AlreadyPresent(existing.clone()));
    }

    topics.push(topic.clone());
    let total = topics.len();
    settings
        .set_text(guild_id, TextField::Topics, topics)
        .await?;

    info!(guild_id, total, "topic added");

    Ok(AddTopicOutcome::Added { topic, total })
}

/// Handle `/configuration add_topic`.
pub async fn run(
    ctx: Context,
    interaction: Box<InteractionCreate>,
    raw_topic: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;
    let Some(guild_id) = interaction.guild_id else {
        respond_ephemeral_message(http, &interaction, guild_only_message()).await?;
        return Ok(());
    };

    if !has_interaction_permission(&interaction, Permissions::MANAGE_GUILD) {
        respond_ephemeral_message(http, &interaction, permission_denied_message()).await?;
        return Ok(());
    }

    let Some(raw_topic) = raw_topic else {
        let usage = format!("Usage: `{}`", META.usage);
        respond_ephemeral_message(http, &interaction, &usage).await?;
        return Ok(());
    };

    let outcome = add_topic(ctx.settings.as_ref(), guild_id.get(), raw_topic).await?;
    respond_ephemeral_message(http, &interaction, &outcome.message()).await
}
