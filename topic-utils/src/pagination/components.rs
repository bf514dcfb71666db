//! Pagination UI component builders (previous/home/next buttons).

use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

use super::page::NavAction;
use super::token::build_custom_id;
use super::view::NavRow;

/// Build the navigation action row for a rendered view.
///
/// Returns no components when the view has no navigation row.
pub fn build_nav_components(command: &str, nav: Option<NavRow>, user_id: u64) -> Vec<Component> {
    let Some(nav) = nav else {
        return vec![];
    };

    let button = |action: NavAction, label: &str, style: ButtonStyle, disabled: bool| {
        Component::Button(Button {
            custom_id: Some(build_custom_id(command, action, user_id)),
            disabled,
            emoji: None,
            label: Some(label.to_owned()),
            style,
            url: None,
            sku_id: None,
        })
    };

    vec![Component::ActionRow(ActionRow {
        components: vec![
            button(
                NavAction::Previous,
                "Previous",
                ButtonStyle::Primary,
                nav.previous_disabled,
            ),
            button(
                NavAction::Home,
                "Home",
                ButtonStyle::Secondary,
                nav.home_disabled(),
            ),
            button(
                NavAction::Next,
                "Next",
                ButtonStyle::Primary,
                nav.next_disabled,
            ),
        ],
    })]
}
