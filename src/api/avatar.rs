use axum::{
    body::Body,
    extract::Extension,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::api::extract::PathParam;
use crate::avatar::BotApiClient;
use crate::error::ApiError;
use crate::middleware::logging::to_response;

pub fn avatar_router(bot: BotApiClient) -> Router {
    Router::new()
        .route("/avatar/:user_id", get(get_avatar))
        .route("/avatar/:user_id/url", get(get_avatar_url))
        .layer(Extension(bot))
}

/// Relays the image without buffering it.
async fn get_avatar(
    PathParam(user_id): PathParam<i64>,
    Extension(bot): Extension<BotApiClient>,
) -> Result<Response, ApiError> {
    let stream = bot.resolve_avatar(user_id).await?;
    let body = Body::from_stream(stream);

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/jpeg"));

    Ok(to_response((StatusCode::OK, headers, body), Ok(())))
}

async fn get_avatar_url(
    PathParam(user_id): PathParam<i64>,
    Extension(bot): Extension<BotApiClient>,
) -> Result<Response, ApiError> {
    let avatar_url = bot.resolve_avatar_url(user_id).await?;
    Ok(to_response(
        (StatusCode::OK, Json(json!({ "avatar_url": avatar_url }))),
        Ok(()),
    ))
}
