use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{category, courtesy_request, ticket_type};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  pub category_id: String,
  pub name: String,
  pub starts_at: DateTime,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "category::Entity",
    from = "Column::CategoryId",
    to = "category::Column::Id"
  )]
  Category,
  #[sea_orm(has_many = "ticket_type::Entity")]
  TicketTypes,
  #[sea_orm(has_many = "courtesy_request::Entity")]
  CourtesyRequests,
}

impl Related<category::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Category.def()
  }
}

impl Related<ticket_type::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::TicketTypes.def()
  }
}

impl Related<courtesy_request::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::CourtesyRequests.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
