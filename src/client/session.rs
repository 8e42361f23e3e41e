use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::auth::Role;

/// The `user` object kept in browser local storage after login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub role: Role,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Identity and community the page was opened with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub topluluk: Option<String>,
}

impl Session {
    /// Builds the session from the stored `user` JSON (if any) and the
    /// page URL carrying `?topluluk=`. Unreadable input leaves the
    /// corresponding half empty.
    pub fn from_context(stored_user: Option<&str>, page_url: &str) -> Self {
        let user = stored_user.and_then(|raw| match serde_json::from_str::<User>(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable stored user");
                None
            }
        });

        let topluluk = Url::parse(page_url).ok().and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "topluluk")
                .map(|(_, value)| value.into_owned())
                .filter(|value| !value.is_empty())
        });

        Self { user, topluluk }
    }
}
