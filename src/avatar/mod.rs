//! Resolves a user's profile photo through the Bot API and relays the bytes.

pub mod client;
pub mod types;

use thiserror::Error;

pub use client::BotApiClient;

#[derive(Error, Debug)]
pub enum AvatarError {
    #[error("Avatar not found!")]
    NotFound,
    #[error("Failed to get file info")]
    FileInfo,
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
    #[error("Failed to download avatar")]
    Download(u16),
    #[error("Upstream request failed: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for AvatarError {
    fn from(value: reqwest::Error) -> Self {
        // request urls carry the bot token
        AvatarError::Transport(value.without_url())
    }
}
