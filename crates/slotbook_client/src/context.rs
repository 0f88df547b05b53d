//! Who is using the page.
//!
//! The booking page learns its user either from the query string the bot
//! appends to the Mini App link (`?name=...&user_id=...`) or from the user
//! object the Telegram host injects. Both collapse into a [`UserContext`].

use reqwest::Url;
use serde::Deserialize;
use slotbook_config::IdentitySource;
use tracing::{info, warn};

use crate::messages::GUEST_NAME;

/// The user object Telegram passes to a Mini App (`initDataUnsafe.user`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl HostUser {
    /// "First Last", falling back to the username.
    pub fn full_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.first_name,
            self.last_name.as_deref().unwrap_or("")
        );
        let full = full.trim();
        if full.is_empty() {
            self.username.clone().unwrap_or_default()
        } else {
            full.to_string()
        }
    }
}

/// Identity the page was opened with. Re-derived on every load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserContext {
    name: String,
    user_id: Option<i64>,
}

impl UserContext {
    pub fn new(name: impl Into<String>, user_id: Option<i64>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            user_id: user_id.filter(|id| *id > 0),
        }
    }

    /// Resolve the context from `raw` according to the configured source.
    pub fn resolve(source: IdentitySource, raw: &str) -> Self {
        let context = match source {
            IdentitySource::Url => Self::from_page_url(raw),
            IdentitySource::Host => Self::from_init_data(raw),
        };
        match context.user_id {
            Some(id) => info!(user_id = id, "User context resolved"),
            None => warn!("No usable user id in page context"),
        }
        context
    }

    /// Reads `name` and `user_id` from a page URL or a bare query string.
    pub fn from_page_url(page_url: &str) -> Self {
        let page_url = page_url.trim();
        let query = match Url::parse(page_url) {
            Ok(url) => url.query().unwrap_or("").to_string(),
            Err(_) => page_url.trim_start_matches('?').to_string(),
        };
        let pairs = parse_pairs(&query);
        let name = lookup(&pairs, "name").unwrap_or_default();
        let user_id = lookup(&pairs, "user_id").and_then(|raw| parse_user_id(&raw));
        Self::new(name, user_id)
    }

    /// Reads the host user from Telegram init data.
    ///
    /// Accepts the raw `initData` query string (with a URL-encoded JSON
    /// `user` field) or the bare user JSON object.
    pub fn from_init_data(init_data: &str) -> Self {
        let init_data = init_data.trim();
        let user_json = if init_data.starts_with('{') {
            Some(init_data.to_string())
        } else {
            lookup(&parse_pairs(init_data), "user")
        };
        match user_json.map(|json| serde_json::from_str::<HostUser>(&json)) {
            Some(Ok(user)) => Self::new(user.full_name(), Some(user.id)),
            Some(Err(e)) => {
                warn!("Host user object is malformed: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    /// The name to greet with.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            GUEST_NAME
        } else {
            &self.name
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.user_id.is_some()
    }
}

fn parse_pairs(query: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str(query).unwrap_or_default()
}

fn lookup(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// Only positive integers identify a user; anything else leaves it unresolved.
fn parse_user_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}
