use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, SqlErr,
    TransactionTrait,
};
use serde::Serialize;
use tracing::info;

use crate::entities::{category, product};
use crate::store::StoreError;

/// A category as callers see it. `products_count` is counted on read.
#[derive(Clone, Debug, PartialEq, Serialize, FromQueryResult)]
pub struct CategoryView {
    pub name: String,
    pub products_count: i64,
}

pub async fn create_category(
    db: &DatabaseConnection,
    name: String,
) -> Result<CategoryView, StoreError> {
    let txn = db.begin().await?;

    if category::Entity::find_by_id(name.clone()).one(&txn).await?.is_some() {
        txn.rollback().await?;
        return Err(StoreError::CategoryExists(name));
    }

    let new_category = category::ActiveModel {
        name: Set(name.clone()),
    };

    match category::Entity::insert(new_category)
        .exec_without_returning(&txn)
        .await
    {
        Ok(_) => txn.commit().await?,
        Err(err) => {
            txn.rollback().await?;
            return Err(match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::CategoryExists(name),
                _ => StoreError::Db(err),
            });
        }
    }

    info!(category = %name, "Category created");
    Ok(CategoryView {
        name,
        products_count: 0,
    })
}

pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<CategoryView>, StoreError> {
    let categories = category::Entity::find()
        .select_only()
        .column(category::Column::Name)
        .column_as(product::Column::Name.count(), "products_count")
        .join(JoinType::LeftJoin, category::Relation::Product.def())
        .group_by(category::Column::Name)
        .order_by_asc(category::Column::Name)
        .into_model::<CategoryView>()
        .all(db)
        .await?;

    Ok(categories)
}

/// Removes the category and every product filed under it.
pub async fn delete_category(db: &DatabaseConnection, name: &str) -> Result<(), StoreError> {
    let txn = db.begin().await?;

    let Some(found) = category::Entity::find_by_id(name.to_owned()).one(&txn).await? else {
        txn.rollback().await?;
        return Err(StoreError::CategoryNotFound(name.to_owned()));
    };

    let removed = product::Entity::delete_many()
        .filter(product::Column::CategoryName.eq(name))
        .exec(&txn)
        .await?;

    let found: category::ActiveModel = found.into();
    found.delete(&txn).await?;
    txn.commit().await?;

    info!(category = %name, products = removed.rows_affected, "Category deleted");
    Ok(())
}

/// Used by the product listing to tell an empty category from a missing one.
pub(crate) async fn find_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<category::Model, StoreError> {
    category::Entity::find_by_id(name.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| StoreError::CategoryNotFound(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{create_product, list_products, test_support::memory_db, NewProduct};

    #[tokio::test]
    async fn created_category_is_listed_with_zero_products() {
        let db = memory_db().await;

        let created = create_category(&db, "fruit".into()).await.unwrap();
        assert_eq!(
            created,
            CategoryView {
                name: "fruit".into(),
                products_count: 0
            }
        );

        let listed = list_categories(&db).await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn duplicate_category_conflicts() {
        let db = memory_db().await;

        create_category(&db, "fruit".into()).await.unwrap();
        let err = create_category(&db, "fruit".into()).await.unwrap_err();
        assert!(matches!(err, StoreError::CategoryExists(name) if name == "fruit"));
    }

    #[tokio::test]
    async fn products_count_follows_products() {
        let db = memory_db().await;

        create_category(&db, "fruit".into()).await.unwrap();
        create_category(&db, "dairy".into()).await.unwrap();
        for name in ["apple", "pear"] {
            create_product(
                &db,
                NewProduct {
                    name: name.into(),
                    price: 1.5,
                    category_name: "fruit".into(),
                },
            )
            .await
            .unwrap();
        }

        let listed = list_categories(&db).await.unwrap();
        assert_eq!(
            listed,
            vec![
                CategoryView {
                    name: "dairy".into(),
                    products_count: 0
                },
                CategoryView {
                    name: "fruit".into(),
                    products_count: 2
                },
            ]
        );
    }

    #[tokio::test]
    async fn delete_cascades_to_products() {
        let db = memory_db().await;

        create_category(&db, "fruit".into()).await.unwrap();
        create_product(
            &db,
            NewProduct {
                name: "apple".into(),
                price: 1.5,
                category_name: "fruit".into(),
            },
        )
        .await
        .unwrap();

        delete_category(&db, "fruit").await.unwrap();

        assert!(list_products(&db).await.unwrap().is_empty());
        assert!(list_categories(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_missing_category_is_not_found() {
        let db = memory_db().await;

        let err = delete_category(&db, "ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::CategoryNotFound(_)));
    }
}
