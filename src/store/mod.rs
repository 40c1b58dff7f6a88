//! Catalog persistence: categories and the products they own.

pub mod category;
pub mod product;

use sea_orm::DbErr;
use thiserror::Error;

pub use category::{create_category, delete_category, list_categories, CategoryView};
pub use product::{
    create_product, delete_product, list_products, list_products_by_category, NewProduct,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Category '{0}' already exists")]
    CategoryExists(String),
    #[error("Category '{0}' not found")]
    CategoryNotFound(String),
    #[error("Category '{0}' does not exist")]
    UnknownCategory(String),
    #[error("Product '{0}' already exists")]
    ProductExists(String),
    #[error("Product '{0}' not found")]
    ProductNotFound(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}
