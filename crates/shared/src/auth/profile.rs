use serde::{Deserialize, Serialize};

use super::OAuthProvider;

/// The signed-in user as returned by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub nickname: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub provider: OAuthProvider,
    /// Account creation time as sent by the backend, not guaranteed parseable
    #[serde(default)]
    pub created_at: Option<String>,
}
