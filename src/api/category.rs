use axum::{
    extract::Extension,
    http::StatusCode,
    response::Response,
    routing::{delete, get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::api::extract::{JsonBody, PathParam};
use crate::error::ApiError;
use crate::middleware::logging::to_response;
use crate::store;

//ROUTERS
pub fn category_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/categories", post(create_category).get(get_categories))
        .route("/categories/", post(create_category).get(get_categories))
        .route("/categories/:name", delete(delete_category))
        .route("/categories/:name/products", get(get_category_products))
        .layer(Extension(db))
}

//ROUTES
async fn create_category(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    JsonBody(payload): JsonBody<CreateCategory>,
) -> Result<Response, ApiError> {
    debug!(?payload, "Called `create_category()`");
    payload.validate()?;

    let created = store::create_category(&db, payload.name).await?;
    Ok(to_response((StatusCode::CREATED, Json(created)), Ok(())))
}

async fn get_categories(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    let categories = store::list_categories(&db).await?;
    Ok(to_response((StatusCode::OK, Json(categories)), Ok(())))
}

async fn delete_category(
    PathParam(name): PathParam<String>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    store::delete_category(&db, &name).await?;
    Ok(to_response(StatusCode::NO_CONTENT, Ok(())))
}

async fn get_category_products(
    PathParam(name): PathParam<String>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    let products = store::list_products_by_category(&db, &name).await?;
    Ok(to_response((StatusCode::OK, Json(products)), Ok(())))
}

//Structs
#[derive(Deserialize, Validate, Clone, Debug)]
struct CreateCategory {
    #[validate(length(min = 1, message = "name must not be empty"))]
    name: String,
}
