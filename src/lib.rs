pub mod api;
pub mod avatar;
pub mod config;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod store;

pub use api::create_api_router;
pub use avatar::BotApiClient;
pub use config::AppConfig;
pub use entities::setup_schema;
