use serde::{Deserialize, Serialize};
use strum::Display;

/// Which form the user came through. Only affects notification wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum LoginKind {
    #[default]
    #[strum(serialize = "Logged in")]
    Login,
    #[strum(serialize = "Signed up")]
    Signup,
}

/// The current (unverified) user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Session {
    username: String,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
