pub mod add_topic;
pub mod remove_topic;
pub mod view_topics;

use tracing::debug;
use twilight_http::Client;
use twilight_model::{
    application::{
        command::{Command, CommandType},
        interaction::application_command::{CommandData, CommandDataOption, CommandOptionValue},
    },
    gateway::payload::incoming::InteractionCreate,
    id::{Id, marker::GuildMarker},
};
use twilight_util::builder::command::{CommandBuilder, StringBuilder, SubCommandBuilder};

use crate::CommandMeta;
use topic_core::Context;
use topic_utils::pagination::respond_ephemeral_message;

/// Top-level slash command name.
pub const NAME: &str = "configuration";
const DESCRIPTION: &str = "Manage this server's bot configuration.";

/// Longest topic accepted by `add_topic`.
pub const MAX_TOPIC_LEN: u16 = 100;

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

pub fn permission_denied_message() -> &'static str {
    "You are not permitted to use this command."
}

/// Resolve the guild icon URL for view thumbnails.
///
/// Lookup failures are logged and treated as "no icon".
pub async fn fetch_guild_icon_url(http: &Client, guild_id: Id<GuildMarker>) -> Option<String> {
    let guild = match http.guild(guild_id).await {
        Ok(response) => match response.model().await {
            Ok(guild) => guild,
            Err(source) => {
                debug!(?source, guild_id = guild_id.get(), "failed to decode guild");
                return None;
            }
        },
        Err(source) => {
            debug!(?source, guild_id = guild_id.get(), "failed to fetch guild");
            return None;
        }
    };

    guild
        .icon
        .map(|icon| guild_icon_url(guild_id.get(), &icon.to_string()))
}

/// CDN URL for a guild icon hash.
pub fn guild_icon_url(guild_id: u64, icon_hash: &str) -> String {
    format!("https://cdn.discordapp.com/icons/{guild_id}/{icon_hash}.png?size=128")
}

/// Build the `/configuration` command definition for registration.
pub fn command_definition() -> anyhow::Result<Command> {
    let topic_option = |description: &str| {
        StringBuilder::new("topic", description)
            .required(true)
            .max_length(MAX_TOPIC_LEN)
    };

    let command = CommandBuilder::new(NAME, DESCRIPTION, CommandType::ChatInput)
        .option(SubCommandBuilder::new(
            view_topics::META.name,
            view_topics::META.desc,
        ))
        .option(
            SubCommandBuilder::new(add_topic::META.name, add_topic::META.desc)
                .option(topic_option("Topic to add")),
        )
        .option(
            SubCommandBuilder::new(remove_topic::META.name, remove_topic::META.desc)
                .option(topic_option("Topic to remove")),
        )
        .validate()?
        .build();

    Ok(command)
}

/// Dispatch a `/configuration` invocation to its subcommand.
pub async fn run(
    ctx: Context,
    interaction: Box<InteractionCreate>,
    data: &CommandData,
) -> anyhow::Result<()> {
    let Some((subcommand, options)) = subcommand(data) else {
        respond_ephemeral_message(&ctx.http, &interaction, "Unknown subcommand.").await?;
        return Ok(());
    };

    match subcommand {
        name if name == view_topics::META.name => view_topics::run(ctx, interaction).await,
        name if name == add_topic::META.name => {
            add_topic::run(ctx, interaction, string_option(options, "topic")).await
        }
        name if name == remove_topic::META.name => {
            remove_topic::run(ctx, interaction, string_option(options, "topic")).await
        }
        _ => {
            respond_ephemeral_message(&ctx.http, &interaction, "Unknown subcommand.").await?;
            Ok(())
        }
    }
}

/// Subcommand name and its nested options.
fn subcommand(data: &CommandData) -> Option<(&str, &[CommandDataOption])> {
    data.options.iter().find_map(|option| match &option.value {
        CommandOptionValue::SubCommand(nested) => Some((option.name.as_str(), nested.as_slice())),
        _ => None,
    })
}

fn string_option<'a>(options: &'a [CommandDataOption], name: &str) -> Option<&'a str> {
    options.iter().find_map(|option| match &option.value {
        CommandOptionValue::String(value) if option.name == name => Some(value.as_str()),
        _ => None,
    })
}

/// Listing of the `/configuration` subcommands.
pub const SUBCOMMANDS: &[CommandMeta] = &[view_topics::META, add_topic::META, remove_topic::META];

#[cfg(test)]
mod tests {
    use twilight_model::application::command::CommandOptionType;

    use super::*;

    #[test]
    fn definition_lists_every_subcommand() {
        let command = command_definition().unwrap();

        assert_eq!(command.name, NAME);
        // Viewing is open to everyone; add and remove check Manage Server themselves.
        assert_eq!(command.default_member_permissions, None);

        let names: Vec<_> = command.options.iter().map(|option| option.name.as_str()).collect();
        let expected: Vec<_> = SUBCOMMANDS.iter().map(|meta| meta.name).collect();
        assert_eq!(names, expected);
        assert!(
            command
                .options
                .iter()
                .all(|option| option.kind == CommandOptionType::SubCommand)
        );
    }

    #[test]
    fn add_topic_requires_topic_option() {
        let command = command_definition().unwrap();
        let add = command
            .options
            .iter()
            .find(|option| option.name == add_topic::META.name)
            .unwrap();
        let nested = add.options.as_deref().unwrap_or_default();

        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].name, "topic");
        assert_eq!(nested[0].required, Some(true));
    }

    #[test]
    fn icon_url_points_at_guild_cdn() {
        assert_eq!(
            guild_icon_url(42, "a_abc"),
            "https://cdn.discordapp.com/icons/42/a_abc.png?size=128"
        );
    }

    #[test]
    fn subcommand_and_string_option_are_extracted() {
        let data = CommandData {
            guild_id: None,
            id: Id::new(1),
            kind: CommandType::ChatInput,
            name: NAME.to_owned(),
            options: vec![CommandDataOption {
                name: "add_topic".to_owned(),
                value: CommandOptionValue::SubCommand(vec![CommandDataOption {
                    name: "topic".to_owned(),
                    value: CommandOptionValue::String("Rust".to_owned()),
                }]),
            }],
            resolved: None,
            target_id: None,
        };

        let (name, options) = subcommand(&data).unwrap();
        assert_eq!(name, "add_topic");
        assert_eq!(string_option(options, "topic"), Some("Rust"));
        assert_eq!(string_option(options, "other"), None);
    }
}
