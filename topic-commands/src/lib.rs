pub mod configuration;

use tracing::info;
use twilight_http::Client;
use twilight_model::{
    application::{command::Command, interaction::InteractionData},
    gateway::payload::incoming::InteractionCreate,
    id::{Id, marker::ApplicationMarker},
};

use configuration::view_topics;
use topic_core::Context;
use topic_utils::pagination::token::command_prefix;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InteractionRoute {
    ConfigurationCommand,
    TopicsButtons,
}

fn route_command(name: &str) -> Option<InteractionRoute> {
    (name == configuration::NAME).then_some(InteractionRoute::ConfigurationCommand)
}

fn route_component(custom_id: &str) -> Option<InteractionRoute> {
    let routes = [(
        command_prefix(view_topics::PAGINATION_COMMAND),
        InteractionRoute::TopicsButtons,
    )];

    routes
        .into_iter()
        .find_map(|(prefix, route)| custom_id.starts_with(&prefix).then_some(route))
}

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub usage: &'static str,
}

/// Slash command definitions registered with Discord.
pub fn command_definitions() -> anyhow::Result<Vec<Command>> {
    Ok(vec![configuration::command_definition()?])
}

/// Overwrite the application's global commands with [`command_definitions`].
pub async fn register_commands(
    http: &Client,
    application_id: Id<ApplicationMarker>,
) -> anyhow::Result<()> {
    let commands = command_definitions()?;

    http.interaction(application_id)
        .set_global_commands(&commands)
        .await?;

    info!(count = commands.len(), "registered global commands");

    Ok(())
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    match interaction.data.as_ref() {
        Some(InteractionData::ApplicationCommand(data)) => {
            if route_command(&data.name) == Some(InteractionRoute::ConfigurationCommand) {
                let data = data.clone();
                configuration::run(ctx, interaction, &data).await?;
            }
        }
        Some(InteractionData::MessageComponent(data)) => {
            if route_component(&data.custom_id) == Some(InteractionRoute::TopicsButtons) {
                let _handled = view_topics::handle_pagination_interaction(ctx, interaction).await?;
            }
        }
        _ => {}
    }

    Ok(())
}
