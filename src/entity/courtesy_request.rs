use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::event;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum CourtesyType {
  #[sea_orm(string_value = "free")]
  #[default]
  Free,
  #[sea_orm(string_value = "discount")]
  Discount,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum CourtesyStatus {
  #[sea_orm(string_value = "pending")]
  #[default]
  Pending,
  #[sea_orm(string_value = "approved")]
  Approved,
  #[sea_orm(string_value = "rejected")]
  Rejected,
  #[sea_orm(string_value = "used")]
  Used,
  #[sea_orm(string_value = "expired")]
  Expired,
}

/// Courtesy (complimentary) admission request. Doubles as the code record:
/// `code` stays null until approval assigns one. Always bound to a single
/// event, never to a user account — the code is a bearer token.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courtesy_requests")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  pub event_id: String,
  pub requester_name: String,
  pub requester_email: String,
  pub code: Option<String>,
  pub code_type: CourtesyType,
  pub discount_value: Option<i64>,
  pub status: CourtesyStatus,
  pub expires_at: Option<DateTime>,
  pub used_at: Option<DateTime>,
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
