use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder, ImageSource};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Build a list embed with a title, body, footer, and optional thumbnail.
///
/// An empty footer is omitted from the embed.
pub fn build_list_embed(
    title: &str,
    description: impl Into<String>,
    footer: &str,
    color: u32,
    thumbnail_url: Option<&str>,
) -> anyhow::Result<Embed> {
    let mut builder = EmbedBuilder::new()
        .title(title)
        .color(color)
        .description(description);

    if !footer.is_empty() {
        builder = builder.footer(EmbedFooterBuilder::new(footer).build());
    }

    if let Some(url) = thumbnail_url {
        builder = builder.thumbnail(ImageSource::url(url)?);
    }

    Ok(builder.validate()?.build())
}
