//! Wire types for the subset of the Bot API the resolver talks to.

use serde::Deserialize;

/// Envelope every Bot API method answers with.
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UserProfilePhotos {
    pub total_count: u32,
    /// One entry per photo, each holding its size variants.
    #[serde(default)]
    pub photos: Vec<Vec<PhotoSize>>,
}

impl UserProfilePhotos {
    /// First photo, first size variant.
    pub fn first_variant(&self) -> Option<&PhotoSize> {
        self.photos.first().and_then(|sizes| sizes.first())
    }
}

#[derive(Deserialize, Debug)]
pub struct PhotoSize {
    pub file_id: String,
    pub file_unique_id: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub file_size: Option<u64>,
}

#[derive(Deserialize, Debug)]
pub struct File {
    pub file_id: String,
    pub file_path: Option<String>,
    pub file_size: Option<u64>,
}
