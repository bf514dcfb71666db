//! Stable facade for pagination helpers used by command handlers.

/// Default idle lifetime of a pagination session.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 120;

mod components;
mod page;
pub mod press;
pub mod respond;
pub mod session;
pub mod token;
mod view;

pub use components::build_nav_components;
pub use page::{NavAction, PaginationError, PaginationState, chunk};
pub use press::{NavPress, PressCheck, check_nav_press};
pub use respond::{Notice, ViewDelivery, respond_ephemeral_message, respond_notice, respond_view};
pub use session::{MemorySessionStore, SessionStore};
pub use view::{ListView, ListViewOptions, NavRow, render, to_embed};
