use axum::{
    extract::Extension,
    http::StatusCode,
    response::Response,
    routing::{delete, post},
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
use crate::store::{self, NewProduct};

//ROUTERS
pub fn product_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/products", post(create_product).get(get_products))
        .route("/products/", post(create_product).get(get_products))
        .route("/products/:name", delete(delete_product))
        .layer(Extension(db))
}

//ROUTES
async fn create_product(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    JsonBody(payload): JsonBody<CreateProduct>,
) -> Result<Response, ApiError> {
    debug!(?payload, "Called `create_product()`");
    payload.validate()?;

    let created = store::create_product(&db, payload.into()).await?;
    Ok(to_response((StatusCode::CREATED, Json(created)), Ok(())))
}

async fn get_products(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    let products = store::list_products(&db).await?;
    Ok(to_response((StatusCode::OK, Json(products)), Ok(())))
}

async fn delete_product(
    PathParam(name): PathParam<String>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    store::delete_product(&db, &name).await?;
    Ok(to_response(StatusCode::NO_CONTENT, Ok(())))
}

//Structs
#[derive(Deserialize, Validate, Clone, Debug)]
struct CreateProduct {
    #[validate(length(min = 1, message = "name must not be empty"))]
    name: String,
    price: f64,
    #[validate(length(min = 1, message = "category_name must not be empty"))]
    category_name: String,
}

impl From<CreateProduct> for NewProduct {
    fn from(value: CreateProduct) -> NewProduct {
        NewProduct {
            name: value.name,
            price: value.price,
            category_name: value.category_name,
        }
    }
}
