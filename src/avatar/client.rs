use axum::body::Bytes;
use futures_util::Stream;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::avatar::{
    types::{ApiResponse, File, UserProfilePhotos},
    AvatarError,
};

/// Only the most recent photo is ever needed.
const PHOTO_LIMIT: u32 = 1;

/// Bot API client. Cheap to clone, the connection pool is shared.
#[derive(Clone)]
pub struct BotApiClient {
    client: Client,
    api_url: String,
    token: String,
}

impl BotApiClient {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AvatarError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(BotApiClient {
            client,
            api_url: api_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Download URL for a file path. Contains the bot token.
    pub fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{}", self.api_url, self.token, file_path)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, AvatarError> {
        let response = self
            .client
            .get(self.method_url(method))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|err| {
            warn!(method, status = %status, "Bot API answered with an unexpected body");
            AvatarError::MalformedResponse(format!("{method}: {err}"))
        })
    }

    pub async fn get_user_profile_photos(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<ApiResponse<UserProfilePhotos>, AvatarError> {
        self.call(
            "getUserProfilePhotos",
            &[("user_id", user_id.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    pub async fn get_file(&self, file_id: &str) -> Result<ApiResponse<File>, AvatarError> {
        self.call("getFile", &[("file_id", file_id.to_owned())]).await
    }

    /// Steps one and two of the chain: the file path of the user's first
    /// photo, first size variant.
    pub async fn resolve_file_path(&self, user_id: i64) -> Result<String, AvatarError> {
        let photos = self.get_user_profile_photos(user_id, PHOTO_LIMIT).await?;

        let photos = match photos.result {
            Some(result) if photos.ok && result.total_count > 0 => result,
            _ => {
                debug!(user_id, "User has no profile photos");
                return Err(AvatarError::NotFound);
            }
        };

        let file_id = match photos.first_variant() {
            Some(size) => size.file_id.clone(),
            None => return Err(AvatarError::NotFound),
        };

        let file = self.get_file(&file_id).await?;
        if !file.ok {
            warn!(
                user_id,
                description = file.description.as_deref().unwrap_or_default(),
                "getFile reported failure"
            );
            return Err(AvatarError::FileInfo);
        }

        file.result
            .and_then(|file| file.file_path)
            .ok_or_else(|| AvatarError::MalformedResponse("getFile: missing file_path".to_owned()))
    }

    pub async fn resolve_avatar_url(&self, user_id: i64) -> Result<String, AvatarError> {
        let file_path = self.resolve_file_path(user_id).await?;
        Ok(self.file_url(&file_path))
    }

    /// Full chain. The returned stream yields the image as it arrives.
    pub async fn resolve_avatar(
        &self,
        user_id: i64,
    ) -> Result<impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static, AvatarError> {
        let file_url = self.resolve_avatar_url(user_id).await?;

        let response = self.client.get(file_url).send().await?;
        if response.status() != StatusCode::OK {
            warn!(user_id, status = %response.status(), "Avatar download failed");
            return Err(AvatarError::Download(response.status().as_u16()));
        }

        Ok(response.bytes_stream())
    }
}
