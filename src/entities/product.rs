use sea_orm::entity::prelude::*;
use serde::Serialize;
use crate::entities::category::Entity as Category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub price: f64,
    #[sea_orm(indexed)]
    pub category_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Category",
        from = "crate::entities::product::Column::CategoryName",
        to = "crate::entities::category::Column::Name",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<crate::entities::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
