//! Microsoft Graph integration.
//!
//! App-only token acquisition via the client-credentials grant, and
//! paginated calendar-view retrieval per mailbox. Both are thin I/O
//! adapters; all interpretation of the fetched events happens in
//! [`crate::calculation`].

mod auth;
mod events;

pub use auth::fetch_token;
pub use events::fetch_events;
