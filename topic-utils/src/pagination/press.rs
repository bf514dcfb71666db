//! Classification of navigation button presses.

use super::page::NavAction;
use super::respond::Notice;
use super::token::{PaginationValidationError, command_prefix, validate_custom_id};

/// A navigation press by the session owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavPress {
    pub user_id: u64,
    pub action: NavAction,
}

/// What a view handler should do with a component interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressCheck {
    /// The custom ID belongs to some other command.
    Ignore,
    /// Answer with this notice and stop.
    Reject(Notice),
    Accept(NavPress),
}

/// Check a button press against `command` and the pressing user.
pub fn check_nav_press(command: &str, custom_id: &str, actor: Option<u64>) -> PressCheck {
    if !custom_id.starts_with(&command_prefix(command)) {
        return PressCheck::Ignore;
    }

    let Some(user_id) = actor else {
        return PressCheck::Reject(Notice::UnknownUser);
    };

    match validate_custom_id(custom_id, command, user_id) {
        Ok(token) => PressCheck::Accept(NavPress {
            user_id,
            action: token.action,
        }),
        Err(PaginationValidationError::WrongUser) => PressCheck::Reject(Notice::WrongUser),
        Err(_) => PressCheck::Reject(Notice::Invalid),
    }
}
