use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{category, event, promo_code_usage, ticket_type};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum DiscountType {
  /// `value` is percentage points of the ticket price.
  #[sea_orm(string_value = "percentage")]
  #[default]
  Percentage,
  /// `value` is an amount in minor currency units, capped per ticket.
  #[sea_orm(string_value = "fixed_amount")]
  FixedAmount,
  /// Full waiver of the ticket price; `value` is ignored.
  #[sea_orm(string_value = "free")]
  Free,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PromoStatus {
  #[sea_orm(string_value = "active")]
  #[default]
  Active,
  #[sea_orm(string_value = "inactive")]
  Inactive,
  #[sea_orm(string_value = "expired")]
  Expired,
  #[sea_orm(string_value = "used_up")]
  UsedUp,
}

/// Promotional code. Scope columns are each nullable: null means the code is
/// unrestricted on that axis. `used_count` only moves through the conditional
/// increment in the usage-recording transaction.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "promo_codes")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  #[sea_orm(unique)]
  pub code: String,
  pub name: String,
  pub description: Option<String>,
  pub discount_type: DiscountType,
  pub value: i64,
  pub currency: String,
  pub status: PromoStatus,
  pub valid_from: DateTime,
  pub valid_until: Option<DateTime>,
  pub usage_limit: Option<i32>,
  pub usage_limit_per_user: Option<i32>,
  pub used_count: i32,
  pub min_order_amount: Option<i64>,
  pub max_discount_amount: Option<i64>,
  pub event_id: Option<String>,
  pub category_id: Option<String>,
  pub ticket_type_id: Option<String>,
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
  #[sea_orm(
    belongs_to = "category::Entity",
    from = "Column::CategoryId",
    to = "category::Column::Id"
  )]
  Category,
  #[sea_orm(
    belongs_to = "ticket_type::Entity",
    from = "Column::TicketTypeId",
    to = "ticket_type::Column::Id"
  )]
  TicketType,
  #[sea_orm(has_many = "promo_code_usage::Entity")]
  Usages,
}

impl Related<promo_code_usage::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Usages.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
