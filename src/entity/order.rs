use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::ticket_type;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum OrderStatus {
  #[sea_orm(string_value = "pending")]
  #[default]
  Pending,
  #[sea_orm(string_value = "completed")]
  Completed,
  #[sea_orm(string_value = "cancelled")]
  Cancelled,
}

/// Created by the checkout flow; discount evaluation only ever writes the
/// discount fields, inside the usage-recording transaction.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  pub user_id: String,
  pub ticket_type_id: String,
  pub quantity: i32,
  pub original_amount: i64,
  pub discount_amount: i64,
  pub final_amount: i64,
  pub discount_code: Option<String>,
  pub status: OrderStatus,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "ticket_type::Entity",
    from = "Column::TicketTypeId",
    to = "ticket_type::Column::Id"
  )]
  TicketType,
}

impl Related<ticket_type::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::TicketType.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
