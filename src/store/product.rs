use sea_orm::{
    DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::info;

use crate::entities::{category, product};
use crate::store::{category::find_category, StoreError};

#[derive(Clone, Debug)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category_name: String,
}

/// Inserts a product. The category is checked before the insert so an
/// unknown one is reported as such rather than as a constraint failure.
pub async fn create_product(
    db: &DatabaseConnection,
    payload: NewProduct,
) -> Result<product::Model, StoreError> {
    let txn = db.begin().await?;

    if category::Entity::find_by_id(payload.category_name.clone())
        .one(&txn)
        .await?
        .is_none()
    {
        txn.rollback().await?;
        return Err(StoreError::UnknownCategory(payload.category_name));
    }

    if product::Entity::find_by_id(payload.name.clone())
        .one(&txn)
        .await?
        .is_some()
    {
        txn.rollback().await?;
        return Err(StoreError::ProductExists(payload.name));
    }

    let created = product::Model {
        name: payload.name,
        price: payload.price,
        category_name: payload.category_name,
    };

    let new_product = product::ActiveModel {
        name: Set(created.name.clone()),
        price: Set(created.price),
        category_name: Set(created.category_name.clone()),
    };

    if let Err(err) = product::Entity::insert(new_product)
        .exec_without_returning(&txn)
        .await
    {
        txn.rollback().await?;
        return Err(match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::ProductExists(created.name),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                StoreError::UnknownCategory(created.category_name)
            }
            _ => StoreError::Db(err),
        });
    }
    txn.commit().await?;

    info!(product = %created.name, category = %created.category_name, "Product created");
    Ok(created)
}

pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, StoreError> {
    Ok(product::Entity::find().all(db).await?)
}

pub async fn list_products_by_category(
    db: &DatabaseConnection,
    category_name: &str,
) -> Result<Vec<product::Model>, StoreError> {
    let category = find_category(db, category_name).await?;

    let products = category
        .find_related(product::Entity)
        .order_by_asc(product::Column::Name)
        .all(db)
        .await?;

    Ok(products)
}

pub async fn delete_product(db: &DatabaseConnection, name: &str) -> Result<(), StoreError> {
    let result = product::Entity::delete_by_id(name.to_owned()).exec(db).await?;

    if result.rows_affected == 0 {
        return Err(StoreError::ProductNotFound(name.to_owned()));
    }

    info!(product = %name, "Product deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{create_category, test_support::memory_db};

    fn apple() -> NewProduct {
        NewProduct {
            name: "apple".into(),
            price: 1.5,
            category_name: "fruit".into(),
        }
    }

    #[tokio::test]
    async fn created_product_matches_input() {
        let db = memory_db().await;
        create_category(&db, "fruit".into()).await.unwrap();

        let created = create_product(&db, apple()).await.unwrap();
        assert_eq!(created.name, "apple");
        assert_eq!(created.price, 1.5);
        assert_eq!(created.category_name, "fruit");

        assert_eq!(list_products(&db).await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let db = memory_db().await;

        let err = create_product(&db, apple()).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownCategory(name) if name == "fruit"));
        assert!(list_products(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_product_conflicts() {
        let db = memory_db().await;
        create_category(&db, "fruit".into()).await.unwrap();

        create_product(&db, apple()).await.unwrap();
        let err = create_product(&db, apple()).await.unwrap_err();
        assert!(matches!(err, StoreError::ProductExists(_)));
    }

    #[tokio::test]
    async fn lists_only_products_of_category() {
        let db = memory_db().await;
        create_category(&db, "fruit".into()).await.unwrap();
        create_category(&db, "dairy".into()).await.unwrap();
        create_product(&db, apple()).await.unwrap();
        create_product(
            &db,
            NewProduct {
                name: "milk".into(),
                price: 0.99,
                category_name: "dairy".into(),
            },
        )
        .await
        .unwrap();

        let fruit = list_products_by_category(&db, "fruit").await.unwrap();
        assert_eq!(fruit.len(), 1);
        assert_eq!(fruit[0].name, "apple");

        let err = list_products_by_category(&db, "bakery").await.unwrap_err();
        assert!(matches!(err, StoreError::CategoryNotFound(_)));
    }

    #[tokio::test]
    async fn delete_product_reports_missing() {
        let db = memory_db().await;
        create_category(&db, "fruit".into()).await.unwrap();
        create_product(&db, apple()).await.unwrap();

        delete_product(&db, "apple").await.unwrap();
        assert!(list_products(&db).await.unwrap().is_empty());

        let err = delete_product(&db, "missing").await.unwrap_err();
        assert!(matches!(err, StoreError::ProductNotFound(name) if name == "missing"));
    }
}
