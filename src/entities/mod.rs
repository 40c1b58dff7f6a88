pub mod category;
pub mod product;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};
use tracing::info;

use crate::entities::{category::Entity as Category, product::Entity as Product};

/// Creates the catalog tables if they are absent. Safe to call on every start.
pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // category first, product references it
    let mut create_category_table = schema.create_table_from_entity(Category);
    let mut create_product_table = schema.create_table_from_entity(Product);

    create_category_table.if_not_exists();
    create_product_table.if_not_exists();

    db.execute(backend.build(&create_category_table)).await?;
    db.execute(backend.build(&create_product_table)).await?;

    info!("Catalog schema ready");
    Ok(())
}
