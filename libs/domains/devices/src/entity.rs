use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::Device;

/// `devices` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(indexed)]
    pub brand: String,
    pub creation_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub const URL: &'static str = "/devices";
    pub const TAG: &'static str = "devices";
}

impl From<Model> for Device {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            brand: model.brand,
            creation_time: model.creation_time,
        }
    }
}

/// Columns for a row; `id == None` leaves the key to the sequence.
pub(crate) fn active_model(
    id: Option<i64>,
    name: String,
    brand: String,
    creation_time: DateTimeUtc,
) -> ActiveModel {
    ActiveModel {
        id: id.map_or(NotSet, Set),
        name: Set(name),
        brand: Set(brand),
        creation_time: Set(creation_time),
    }
}
