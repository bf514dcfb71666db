use tracing::warn;
use twilight_model::{
    application::interaction::InteractionData, gateway::payload::incoming::InteractionCreate,
};

use crate::CommandMeta;
use crate::configuration::{fetch_guild_icon_url, guild_only_message};
use topic_core::{Context, TopicSessions};
use topic_database::{SettingsService, TextField};
use topic_utils::pagination::{
    ListView, ListViewOptions, NavAction, Notice, PaginationState, PressCheck, ViewDelivery,
    build_nav_components, check_nav_press, render, respond_ephemeral_message, respond_notice,
    respond_view, to_embed,
};

pub const META: CommandMeta = CommandMeta {
    name: "view_topics",
    desc: "View the current topics in the configuration",
    usage: "/configuration view_topics",
};

/// Pagination key carried in navigation button custom IDs.
pub const PAGINATION_COMMAND: &str = "topics";

/// Topics shown per page.
pub const TOPICS_PER_PAGE: usize = 10;

/// Outcome of opening a topic view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicsReply {
    /// The freshly stored session could not be read back.
    InitFailed,
    View(ListView),
}

/// Presentation settings for the topic list.
pub fn view_options(accent_color: u32) -> ListViewOptions {
    ListViewOptions {
        heading: "Current Topics in Configuration".to_owned(),
        empty_message: "There are no topics configured.".to_owned(),
        item_noun: "Topics".to_owned(),
        accent_color,
    }
}

/// Load the guild's topics, start a fresh session for `user_id`, and render page one.
pub async fn open_topic_view(
    settings: &dyn SettingsService,
    sessions: &TopicSessions,
    guild_id: u64,
    user_id: u64,
    accent_color: u32,
) -> anyhow::Result<TopicsReply> {
    settings.configure(guild_id).await?;
    let topics = settings.get_text(guild_id, TextField::Topics).await?;

    let state = PaginationState::paginate(&topics, TOPICS_PER_PAGE)?;
    sessions.set(user_id, state).await;

    let Some(state) = sessions.get(user_id).await else {
        warn!(guild_id, user_id, "pagination session missing right after store");
        return Ok(TopicsReply::InitFailed);
    };

    Ok(TopicsReply::View(render(&state, topics.len(), &view_options(accent_color))))
}

/// Apply a navigation action to the user's session and render the new page.
///
/// Returns `None` when the session is missing or expired.
pub async fn navigate_topic_view(
    sessions: &TopicSessions,
    user_id: u64,
    action: NavAction,
    accent_color: u32,
) -> Option<ListView> {
    let mut state = sessions.get(user_id).await?;
    state.navigate(action);
    sessions.set(user_id, state.clone()).await;

    Some(render(&state, state.item_count(), &view_options(accent_color)))
}

/// Handle `/configuration view_topics`.
pub async fn run(ctx: Context, interaction: Box<InteractionCreate>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let Some(guild_id) = interaction.guild_id else {
        respond_ephemeral_message(http, &interaction, guild_only_message()).await?;
        return Ok(());
    };

    let Some(user_id) = interaction.author_id().map(|id| id.get()) else {
        respond_notice(http, &interaction, Notice::UnknownUser).await?;
        return Ok(());
    };

    let reply = open_topic_view(
        ctx.settings.as_ref(),
        ctx.sessions.as_ref(),
        guild_id.get(),
        user_id,
        ctx.config.embed_color,
    )
    .await?;

    let view = match reply {
        TopicsReply::InitFailed => {
            respond_notice(http, &interaction, Notice::InitFailed).await?;
            return Ok(());
        }
        TopicsReply::View(view) => view,
    };

    let thumbnail = fetch_guild_icon_url(http, guild_id).await;
    let embed = to_embed(&view, thumbnail.as_deref())?;
    let components = build_nav_components(PAGINATION_COMMAND, view.navigation, user_id);

    respond_view(http, &interaction, ViewDelivery::Open, embed, components).await
}

/// Handle navigation button presses on a topic view.
pub async fn handle_pagination_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<bool> {
    let http = &ctx.http;
    let Some(InteractionData::MessageComponent(data)) = interaction.data.as_ref() else {
        return Ok(false);
    };

    let actor = interaction.author_id().map(|id| id.get());
    let press = match check_nav_press(PAGINATION_COMMAND, &data.custom_id, actor) {
        PressCheck::Ignore => return Ok(false),
        PressCheck::Reject(notice) => {
            respond_notice(http, &interaction, notice).await?;
            return Ok(true);
        }
        PressCheck::Accept(press) => press,
    };

    let Some(view) = navigate_topic_view(
        ctx.sessions.as_ref(),
        press.user_id,
        press.action,
        ctx.config.embed_color,
    )
    .await
    else {
        respond_notice(http, &interaction, Notice::Expired).await?;
        return Ok(true);
    };

    let thumbnail = match interaction.guild_id {
        Some(guild_id) => fetch_guild_icon_url(http, guild_id).await,
        None => None,
    };
    let embed = to_embed(&view, thumbnail.as_deref())?;
    let components = build_nav_components(PAGINATION_COMMAND, view.navigation, press.user_id);

    respond_view(http, &interaction, ViewDelivery::Update, embed, components).await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use topic_database::MemorySettings;
    use topic_utils::pagination::{MemorySessionStore, NavRow, SessionStore};

    const GUILD: u64 = 10;
    const USER: u64 = 20;
    const COLOR: u32 = 0x90_54_30;

    /// Store that accepts writes but never returns anything.
    struct ForgetfulStore;

    #[async_trait]
    impl SessionStore<PaginationState<String>> for ForgetfulStore {
        async fn set(&self, _user_id: u64, _state: PaginationState<String>) {}

        async fn get(&self, _user_id: u64) -> Option<PaginationState<String>> {
            None
        }

        async fn remove(&self, _user_id: u64) {}

        async fn prune_expired(&self) -> usize {
            0
        }
    }

    fn sessions() -> MemorySessionStore<PaginationState<String>> {
        MemorySessionStore::new(Duration::from_secs(120))
    }

    async fn settings_with(count: usize) -> MemorySettings {
        let settings = MemorySettings::new();
        let topics = (1..=count).map(|index| format!("Topic {index}")).collect();
        settings
            .set_text(GUILD, TextField::Topics, topics)
            .await
            .unwrap();
        settings
    }

    fn expect_view(reply: TopicsReply) -> ListView {
        match reply {
            TopicsReply::View(view) => view,
            TopicsReply::InitFailed => panic!("expected a rendered view"),
        }
    }

    #[tokio::test]
    async fn twenty_five_topics_open_on_first_of_three_pages() {
        let settings = settings_with(25).await;
        let sessions = sessions();

        let view = expect_view(
            open_topic_view(&settings, &sessions, GUILD, USER, COLOR)
                .await
                .unwrap(),
        );

        assert_eq!(view.footer, "Page: 1/3 • Total Topics: 25");
        assert_eq!(
            view.navigation,
            Some(NavRow {
                previous_disabled: true,
                next_disabled: false,
            })
        );

        let stored = sessions.get(USER).await.unwrap();
        let sizes: Vec<usize> = stored.pages().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
        assert_eq!(stored.page(), 0);
    }

    #[tokio::test]
    async fn no_topics_renders_fallback_without_navigation() {
        let settings = MemorySettings::new();
        let sessions = sessions();

        let view = expect_view(
            open_topic_view(&settings, &sessions, GUILD, USER, COLOR)
                .await
                .unwrap(),
        );

        assert_eq!(view.body, "There are no topics configured.");
        assert_eq!(view.navigation, None);
        assert!(build_nav_components(PAGINATION_COMMAND, view.navigation, USER).is_empty());
    }

    #[tokio::test]
    async fn lost_session_reports_init_failure() {
        let settings = settings_with(3).await;

        let reply = open_topic_view(&settings, &ForgetfulStore, GUILD, USER, COLOR)
            .await
            .unwrap();

        assert_eq!(reply, TopicsReply::InitFailed);
        assert_eq!(Notice::InitFailed.text(), "Failed to initialize pagination state");
    }

    #[tokio::test]
    async fn reopening_resets_to_first_page() {
        let settings = settings_with(25).await;
        let sessions = sessions();

        open_topic_view(&settings, &sessions, GUILD, USER, COLOR)
            .await
            .unwrap();
        navigate_topic_view(&sessions, USER, NavAction::Next, COLOR)
            .await
            .unwrap();
        assert_eq!(sessions.get(USER).await.unwrap().page(), 1);

        open_topic_view(&settings, &sessions, GUILD, USER, COLOR)
            .await
            .unwrap();
        assert_eq!(sessions.get(USER).await.unwrap().page(), 0);
    }

    #[tokio::test]
    async fn navigation_walks_pages_and_persists_position() {
        let settings = settings_with(25).await;
        let sessions = sessions();
        open_topic_view(&settings, &sessions, GUILD, USER, COLOR)
            .await
            .unwrap();

        let second = navigate_topic_view(&sessions, USER, NavAction::Next, COLOR)
            .await
            .unwrap();
        assert_eq!(second.footer, "Page: 2/3 • Total Topics: 25");
        assert!(second.body.starts_with("**11.** *Topic 11*"));

        let last = navigate_topic_view(&sessions, USER, NavAction::Next, COLOR)
            .await
            .unwrap();
        assert_eq!(last.navigation.map(|nav| nav.next_disabled), Some(true));

        let still_last = navigate_topic_view(&sessions, USER, NavAction::Next, COLOR)
            .await
            .unwrap();
        assert_eq!(still_last.footer, "Page: 3/3 • Total Topics: 25");

        let home = navigate_topic_view(&sessions, USER, NavAction::Home, COLOR)
            .await
            .unwrap();
        assert_eq!(home.footer, "Page: 1/3 • Total Topics: 25");
        assert_eq!(sessions.get(USER).await.unwrap().page(), 0);
    }

    #[tokio::test]
    async fn sessions_are_per_user() {
        let settings = settings_with(25).await;
        let sessions = sessions();
        open_topic_view(&settings, &sessions, GUILD, USER, COLOR)
            .await
            .unwrap();
        open_topic_view(&settings, &sessions, GUILD, USER + 1, COLOR)
            .await
            .unwrap();

        navigate_topic_view(&sessions, USER, NavAction::Next, COLOR)
            .await
            .unwrap();

        assert_eq!(sessions.get(USER).await.unwrap().page(), 1);
        assert_eq!(sessions.get(USER + 1).await.unwrap().page(), 0);
    }

    #[tokio::test]
    async fn navigation_without_session_is_none() {
        let sessions = sessions();
        assert!(
            navigate_topic_view(&sessions, USER, NavAction::Next, COLOR)
                .await
                .is_none()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn navigation_after_expiry_is_none() {
        let settings = settings_with(25).await;
        let sessions = sessions();
        open_topic_view(&settings, &sessions, GUILD, USER, COLOR)
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(121)).await;

        assert!(
            navigate_topic_view(&sessions, USER, NavAction::Next, COLOR)
                .await
                .is_none()
        );
    }
}
