use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::event;

/// Read-only pricing and scope input for discount evaluation; `price` is in
/// minor currency units.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket_types")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  pub event_id: String,
  pub name: String,
  pub price: i64,
  pub currency: String,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "event::Entity",
    from = "Column::EventId",
    to = "event::Column::Id"
  )]
  Event,
}

impl Related<event::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Event.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
