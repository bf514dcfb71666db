/// Generic embed builders shared across commands.
pub mod embed;
/// Shared pagination helpers and interaction utilities.
pub mod pagination;
/// Permission helper utilities.
pub mod permissions;
