use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Money;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(default)]
    pub property_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub code_internal: String,
    #[sea_orm(column_type = "Text")]
    pub price: Money,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::owner::Entity",
        from = "Column::OwnerId",
        to = "super::owner::Column::OwnerId",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::property_image::Entity")]
    PropertyImage,
    #[sea_orm(has_many = "super::property_trace::Entity")]
    PropertyTrace,
}

impl Related<super::owner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::property_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyImage.def()
    }
}

impl Related<super::property_trace::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyTrace.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl super::Record for Entity {
    type Active = ActiveModel;

    fn ensure_id(model: &mut Model) {
        if model.property_id.is_nil() {
            model.property_id = Uuid::new_v4();
        }
    }
}
