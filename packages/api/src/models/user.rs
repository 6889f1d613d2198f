//! # User model for signed-in visitors
//!
//! Accounts are owned by the hosted identity service; the server converts its
//! user payload (`backend::BackendUser`) into [`UserInfo`], a client-safe subset
//! that is `Serialize + Deserialize + PartialEq` and can cross the server/client
//! boundary via Dioxus server functions. Tokens never appear here.

use serde::{Deserialize, Serialize};

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl UserInfo {
    /// Get display name, falling back to the part of the email before `@`.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) => name,
            None => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}
