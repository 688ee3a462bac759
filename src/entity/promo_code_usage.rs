use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::promo_code;

/// One row per successful redemption, written atomically with the promo
/// code's `used_count` increment. Immutable after creation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "promo_code_usages")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub promo_code_id: String,
  pub user_id: String,
  pub order_id: String,
  pub discount_amount: i64,
  pub original_amount: i64,
  pub final_amount: i64,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "promo_code::Entity",
    from = "Column::PromoCodeId",
    to = "promo_code::Column::Id"
  )]
  PromoCode,
}

impl Related<promo_code::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::PromoCode.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
