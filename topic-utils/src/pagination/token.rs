//! Navigation button custom ID encoding, parsing, and validation.
//!
//! Page position lives in the session store, so a custom ID only carries the
//! command, the navigation action, and the owning user.

use super::page::NavAction;

const TOKEN_PREFIX: &str = "pg";

/// Parsed navigation token from a button custom ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationToken {
    /// Logical command name (e.g. `topics`).
    pub command: String,
    pub action: NavAction,
    /// User ID that owns this pagination session.
    pub user_id: u64,
}

/// Validation outcome for navigation button presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationValidationError {
    Invalid,
    WrongCommand,
    WrongUser,
}

/// Custom ID prefix shared by every button of `command`.
pub fn command_prefix(command: &str) -> String {
    format!("{TOKEN_PREFIX}:{command}:")
}

/// Build a compact custom ID for a navigation button.
pub fn build_custom_id(command: &str, action: NavAction, user_id: u64) -> String {
    format!("{TOKEN_PREFIX}:{command}:{}:{user_id}", action.as_str())
}

/// Parse a navigation custom ID.
pub fn parse_custom_id(custom_id: &str) -> Option<PaginationToken> {
    let mut parts = custom_id.split(':');

    if parts.next()? != TOKEN_PREFIX {
        return None;
    }

    let command = parts.next()?.to_owned();
    let action = NavAction::parse(parts.next()?)?;
    let user_id = parts.next()?.parse::<u64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(PaginationToken {
        command,
        action,
        user_id,
    })
}

/// Validate a navigation token for command and owner.
pub fn validate_custom_id(
    custom_id: &str,
    expected_command: &str,
    actor_user_id: u64,
) -> Result<PaginationToken, PaginationValidationError> {
    let token = parse_custom_id(custom_id).ok_or(PaginationValidationError::Invalid)?;

    if token.command != expected_command {
        return Err(PaginationValidationError::WrongCommand);
    }

    if token.user_id != actor_user_id {
        return Err(PaginationValidationError::WrongUser);
    }

    Ok(token)
}
