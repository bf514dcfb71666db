//! Rendering of paginated list views.
//!
//! [`render`] produces a plain [`ListView`] value. [`to_embed`] and
//! [`build_nav_components`](super::components::build_nav_components) turn it
//! into Twilight models at the edge.

use std::fmt::Display;

use twilight_model::channel::message::embed::Embed;

use crate::embed::build_list_embed;

use super::page::PaginationState;

/// Static presentation settings for a paginated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewOptions {
    pub heading: String,
    /// Body shown when the current page has no items.
    pub empty_message: String,
    /// Plural noun used in the footer total (e.g. `Topics`).
    pub item_noun: String,
    pub accent_color: u32,
}

/// Enabled state of the three navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavRow {
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl NavRow {
    /// Home always resets to the first page and is never disabled.
    pub fn home_disabled(&self) -> bool {
        false
    }
}

/// Rendered page of a list plus its navigation affordances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub heading: String,
    pub body: String,
    pub footer: String,
    pub accent_color: u32,
    /// `None` when the list has no items at all.
    pub navigation: Option<NavRow>,
}

/// Project the current page of `state` into a display value.
pub fn render<T: Display>(
    state: &PaginationState<T>,
    total_item_count: usize,
    options: &ListViewOptions,
) -> ListView {
    let first = state.first_item_number();
    let body = state
        .current_items()
        .iter()
        .enumerate()
        .map(|(index, item)| format!("**{}.** *{}*", first + index, item))
        .collect::<Vec<_>>()
        .join("\n");

    let body = if body.is_empty() {
        options.empty_message.clone()
    } else {
        body
    };

    let footer = format!(
        "Page: {}/{} • Total {}: {}",
        state.page() + 1,
        state.page_count(),
        options.item_noun,
        total_item_count
    );

    let navigation = (total_item_count > 0).then(|| NavRow {
        previous_disabled: state.is_first(),
        next_disabled: state.is_last(),
    });

    ListView {
        heading: options.heading.clone(),
        body,
        footer,
        accent_color: options.accent_color,
        navigation,
    }
}

/// Build the embed carrying a rendered list view, with an optional thumbnail.
pub fn to_embed(view: &ListView, thumbnail_url: Option<&str>) -> anyhow::Result<Embed> {
    build_list_embed(
        &view.heading,
        view.body.clone(),
        &view.footer,
        view.accent_color,
        thumbnail_url,
    )
}
