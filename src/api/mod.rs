pub mod avatar;
pub mod category;
pub mod extract;
pub mod product;

use axum::{middleware::from_fn, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::avatar::BotApiClient;
use crate::middleware::logging::logging_middleware;
use avatar::avatar_router;
use category::category_router;
use product::product_router;

pub fn create_api_router(shared_db: Arc<DatabaseConnection>, bot: BotApiClient) -> Router {
    // Wide open. Not meant for production.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(avatar_router(bot))
        .merge(category_router(shared_db.clone()))
        .merge(product_router(shared_db))
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
