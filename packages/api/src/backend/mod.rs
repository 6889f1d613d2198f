//! # Hosted backend — identity service and table store
//!
//! Thin client for a Supabase-compatible backend-as-a-service. The backend owns
//! authentication and persistence; this module only shapes requests and maps
//! responses.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Project URL and anonymous key from the environment. |
//! | [`client`] | [`BackendClient`]: sign-up, sign-in, sign-out and user lookup against `/auth/v1`. |
//! | [`table`] | [`TableQuery`]: select / insert / delete with equality filters against `/rest/v1`. |
//! | [`favorites`] | [`RestFavorites`]: the `favorites` table as a [`store::FavoriteStore`]. |

mod client;
mod config;
mod favorites;
mod table;

pub use client::{backend_client, BackendClient, BackendSession, BackendUser};
pub use config::BackendConfig;
pub use favorites::RestFavorites;
pub use table::TableQuery;

/// Table holding one profile row per registered user.
pub const USERS_TABLE: &str = "users";
/// Table holding favorite rows.
pub const FAVORITES_TABLE: &str = "favorites";
