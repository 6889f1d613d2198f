//! Session handling for the hosted identity service.

#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use session::{
    clear_session, current_session, refresh_session, store_session, SessionData,
    SESSION_ACCESS_TOKEN_KEY, SESSION_REFRESH_TOKEN_KEY, SESSION_USER_ID_KEY,
};
