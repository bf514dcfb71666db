use tracing::info;
use twilight_model::{gateway::payload::incoming::InteractionCreate, guild::Permissions};

use crate::CommandMeta;
use crate::configuration::{guild_only_message, permission_denied_message};
use topic_core::Context;
use topic_database::{SettingsService, TextField};
use topic_utils::pagination::respond_ephemeral_message;
use topic_utils::permissions::has_interaction_permission;

pub const META: CommandMeta = CommandMeta {
    name: "remove_topic",
    desc: "Remove a topic from the configuration",
    usage: "/configuration remove_topic <topic>",
};

/// Remove the first topic matching `raw` (case-insensitive).
///
/// Returns the removed value, or `None` when nothing matched.
pub async fn remove_topic(
    settings: &dyn SettingsService,
    guild_id: u64,
    raw: &str,
) -> anyhow::Result<Option<String>> {
    let wanted = raw.trim().to_lowercase();
    let mut topics = settings.get_text(guild_id, TextField::Topics).await?;

    let Some(index) = topics
        .iter()
        .position(|topic| topic.to_lowercase() == wanted)
    else {
        return Ok(None);
    };

    let removed = topics.remove(index);
    let remaining = topics.len();
    settings
        .set_text(guild_id, TextField::Topics, topics)
        .await?;

    info!(guild_id, remaining, "topic removed");

    Ok(Some(removed))
}

/// Handle `/configuration remove_topic`.
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

    let out = match remove_topic(ctx.settings.as_ref(), guild_id.get(), raw_topic).await? {
        Some(removed) => format!("Removed topic *{removed}*."),
        None => format!("No topic named *{}* is configured.", raw_topic.trim()),
    };

    respond_ephemeral_message(http, &interaction, &out).await
}
