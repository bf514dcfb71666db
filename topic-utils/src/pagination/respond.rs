//! Interaction replies used by paginated views and their commands.

use twilight_http::Client;
use twilight_model::{
    channel::message::{MessageFlags, component::Component, embed::Embed},
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseType},
};
use twilight_util::builder::InteractionResponseDataBuilder;

/// Fixed ephemeral notices a paginated view can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The button belongs to another user's session.
    WrongUser,
    /// No live session for the presser.
    Expired,
    /// The custom ID could not be parsed.
    Invalid,
    /// The interaction carried no user.
    UnknownUser,
    /// A freshly stored session could not be read back.
    InitFailed,
}

impl Notice {
    pub fn text(self) -> &'static str {
        match self {
            Notice::WrongUser => "This pagination session belongs to another user.",
            Notice::Expired => "This pagination session expired. Run the command again.",
            Notice::Invalid => "Invalid pagination interaction.",
            Notice::UnknownUser => "Unable to determine interaction user.",
            Notice::InitFailed => "Failed to initialize pagination state",
        }
    }
}

/// How a rendered page reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewDelivery {
    /// New ephemeral message answering a slash command.
    Open,
    /// In-place edit of the message whose button was pressed.
    Update,
}

/// Ephemeral text reply.
pub fn text_response(content: &str) -> InteractionResponse {
    InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(content)
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    }
}

/// Reply carrying one page embed and its navigation row.
pub fn view_response(
    delivery: ViewDelivery,
    embed: Embed,
    components: Vec<Component>,
) -> InteractionResponse {
    let data = InteractionResponseDataBuilder::new()
        .embeds([embed])
        .components(components);

    match delivery {
        ViewDelivery::Open => InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(data.flags(MessageFlags::EPHEMERAL).build()),
        },
        ViewDelivery::Update => InteractionResponse {
            kind: InteractionResponseType::UpdateMessage,
            data: Some(data.build()),
        },
    }
}

async fn send(
    http: &Client,
    interaction: &InteractionCreate,
    response: &InteractionResponse,
) -> anyhow::Result<()> {
    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, response)
        .await?;

    Ok(())
}

pub async fn respond_ephemeral_message(
    http: &Client,
    interaction: &InteractionCreate,
    content: &str,
) -> anyhow::Result<()> {
    send(http, interaction, &text_response(content)).await
}

pub async fn respond_notice(
    http: &Client,
    interaction: &InteractionCreate,
    notice: Notice,
) -> anyhow::Result<()> {
    respond_ephemeral_message(http, interaction, notice.text()).await
}

/// Deliver a rendered page, either as a new ephemeral reply or as an update.
pub async fn respond_view(
    http: &Client,
    interaction: &InteractionCreate,
    delivery: ViewDelivery,
    embed: Embed,
    components: Vec<Component>,
) -> anyhow::Result<()> {
    send(http, interaction, &view_response(delivery, embed, components)).await
}
