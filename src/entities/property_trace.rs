use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Money;

/// A recorded price/tax event for a property.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "property_traces")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(default)]
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub value: Money,
    #[sea_orm(column_type = "Text")]
    pub tax: Money,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property::Entity",
        from = "Column::PropertyId",
        to = "super::property::Column::PropertyId",
        on_delete = "Cascade"
    )]
    Property,
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl super::Record for Entity {
    type Active = ActiveModel;

    fn ensure_id(model: &mut Model) {
        if model.id.is_nil() {
            model.id = Uuid::new_v4();
        }
    }
}
