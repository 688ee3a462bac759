use serde::Deserialize;
use uuid::Uuid;

use crate::{
  entity::{
    DiscountType, PromoStatus, courtesy_request, event, order, promo_code,
    promo_code_usage, ticket_type,
  },
  prelude::*,
  sv::discount,
  utils,
};

pub struct Promo<'a> {
  db: &'a DatabaseConnection,
}

/// Successful promo validation: the code record plus totals for the whole
/// requested quantity.
#[derive(Debug)]
pub struct PromoDiscount {
  pub promo: promo_code::Model,
  pub discount_amount: i64,
  pub final_amount: i64,
  pub discount_percentage: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreatePromo {
  pub code: String,
  pub name: String,
  pub description: Option<String>,
  pub discount_type: DiscountType,
  pub value: i64,
  pub currency: String,
  pub valid_from: DateTime,
  pub valid_until: Option<DateTime>,
  pub usage_limit: Option<i32>,
  pub usage_limit_per_user: Option<i32>,
  pub min_order_amount: Option<i64>,
  pub max_discount_amount: Option<i64>,
  pub event_id: Option<String>,
  pub category_id: Option<String>,
  pub ticket_type_id: Option<String>,
}

impl<'a> Promo<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(
    &self,
    params: CreatePromo,
  ) -> Result<promo_code::Model> {
    let code = utils::normalize_code(&params.code);
    if code.is_empty() {
      return Err(Error::InvalidArgs("Code must not be empty".into()));
    }

    match params.discount_type {
      DiscountType::Percentage => {
        if !(0..=100).contains(&params.value) {
          return Err(Error::InvalidArgs(
            "Percentage value must be between 0 and 100".into(),
          ));
        }
      }
      DiscountType::FixedAmount => {
        if params.value <= 0 {
          return Err(Error::InvalidArgs(
            "Fixed discount amount must be positive".into(),
          ));
        }
      }
      DiscountType::Free => {}
    }

    for limit in [params.usage_limit, params.usage_limit_per_user] {
      if let Some(limit) = limit
        && limit <= 0
      {
        return Err(Error::InvalidArgs("Usage limits must be positive".into()));
      }
    }

    // Codes live in a single namespace shared with courtesy codes; a
    // collision would let the promo path permanently shadow the courtesy
    // record during resolution.
    let taken = promo_code::Entity::find()
      .filter(promo_code::Column::Code.eq(&code))
      .one(self.db)
      .await?
      .is_some()
      || courtesy_request::Entity::find()
        .filter(courtesy_request::Column::Code.eq(&code))
        .one(self.db)
        .await?
        .is_some();
    if taken {
      return Err(Error::InvalidArgs(format!("Code {code} is already in use")));
    }

    let now = Utc::now().naive_utc();
    let promo = promo_code::ActiveModel {
      id: Set(Uuid::new_v4().to_string()),
      code: Set(code),
      name: Set(params.name),
      description: Set(params.description),
      discount_type: Set(params.discount_type),
      value: Set(params.value),
      currency: Set(params.currency),
      status: Set(PromoStatus::Active),
      valid_from: Set(params.valid_from),
      valid_until: Set(params.valid_until),
      usage_limit: Set(params.usage_limit),
      usage_limit_per_user: Set(params.usage_limit_per_user),
      used_count: Set(0),
      min_order_amount: Set(params.min_order_amount),
      max_discount_amount: Set(params.max_discount_amount),
      event_id: Set(params.event_id),
      category_id: Set(params.category_id),
      ticket_type_id: Set(params.ticket_type_id),
      created_at: Set(now),
    };

    Ok(promo.insert(self.db).await?)
  }

  pub async fn by_code(
    &self,
    code: &str,
  ) -> Result<Option<promo_code::Model>> {
    let promo = promo_code::Entity::find()
      .filter(promo_code::Column::Code.eq(utils::normalize_code(code)))
      .one(self.db)
      .await?;
    Ok(promo)
  }

  pub async fn set_status(
    &self,
    id: &str,
    status: PromoStatus,
  ) -> Result<()> {
    let promo = promo_code::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::PromoCodeNotFound)?;

    promo_code::ActiveModel { status: Set(status), ..promo.into() }
      .update(self.db)
      .await?;

    Ok(())
  }

  /// Checks a code against a ticket purchase. Read-only: `used_count` moves
  /// only in [`Promo::record_usage`], so validation stays idempotent and
  /// retryable.
  pub async fn validate(
    &self,
    code: &str,
    user_id: &str,
    ticket_type_id: &str,
    quantity: i32,
  ) -> Result<PromoDiscount> {
    if quantity <= 0 {
      return Err(Error::InvalidArgs("Quantity must be positive".into()));
    }

    let promo = self.by_code(code).await?.ok_or(Reject::CodeNotFound)?;

    if promo.status != PromoStatus::Active {
      return Err(Reject::NotActive.into());
    }

    let now = Utc::now().naive_utc();
    if now < promo.valid_from {
      return Err(Reject::NotYetValid.into());
    }
    if let Some(until) = promo.valid_until
      && now > until
    {
      return Err(Reject::CodeExpired.into());
    }

    if let Some(limit) = promo.usage_limit
      && promo.used_count >= limit
    {
      return Err(Reject::UsageLimitReached.into());
    }

    if let Some(per_user) = promo.usage_limit_per_user {
      let prior = self.user_usages(&promo.id, user_id, self.db).await?;
      if prior >= per_user as u64 {
        return Err(Reject::UserLimitReached.into());
      }
    }

    let (ticket, event) = ticket_type::Entity::find_by_id(ticket_type_id)
      .find_also_related(event::Entity)
      .one(self.db)
      .await?
      .ok_or(Reject::TicketTypeNotFound)?;
    let event = event.ok_or(Reject::TicketTypeNotFound)?;

    if let Some(event_id) = &promo.event_id
      && event_id != &ticket.event_id
    {
      return Err(Reject::EventMismatch.into());
    }
    if let Some(category_id) = &promo.category_id
      && category_id != &event.category_id
    {
      return Err(Reject::CategoryMismatch.into());
    }
    if let Some(tt_id) = &promo.ticket_type_id
      && tt_id != &ticket.id
    {
      return Err(Reject::TicketTypeMismatch.into());
    }

    let quantity = i64::from(quantity);
    let base_total = ticket.price * quantity;
    if let Some(required) = promo.min_order_amount
      && base_total < required
    {
      return Err(
        Reject::MinimumNotMet { required, currency: promo.currency.clone() }
          .into(),
      );
    }

    let per = discount::per_ticket(ticket.price, &discount::Rule {
      discount_type: promo.discount_type.clone(),
      value: promo.value,
      max_discount_amount: promo.max_discount_amount,
    });

    let discount_amount = per.discount_amount * quantity;
    let final_amount = per.final_amount * quantity;

    Ok(PromoDiscount {
      discount_percentage: discount::percent_of(discount_amount, base_total),
      promo,
      discount_amount,
      final_amount,
    })
  }

  /// Books a redemption after payment is confirmed: usage row, `used_count`
  /// increment, and the order's discount fields, in one transaction.
  ///
  /// The increment re-checks `usage_limit` at write time; a zero-row update
  /// means a racing redemption took the last slot after our validation read.
  pub async fn record_usage(
    &self,
    promo: &promo_code::Model,
    user_id: &str,
    order_id: &str,
    original_amount: i64,
    final_amount: i64,
  ) -> Result<()> {
    let txn = self.db.begin().await?;

    let updated = promo_code::Entity::update_many()
      .col_expr(
        promo_code::Column::UsedCount,
        Expr::col(promo_code::Column::UsedCount).add(1),
      )
      .filter(promo_code::Column::Id.eq(&promo.id))
      .filter(
        Condition::any()
          .add(promo_code::Column::UsageLimit.is_null())
          .add(
            Expr::col(promo_code::Column::UsedCount)
              .lt(Expr::col(promo_code::Column::UsageLimit)),
          ),
      )
      .exec(&txn)
      .await?;
    if updated.rows_affected == 0 {
      return Err(Error::UsageConflict("promo code usage limit reached"));
    }

    if let Some(per_user) = promo.usage_limit_per_user {
      let prior = self.user_usages(&promo.id, user_id, &txn).await?;
      if prior >= per_user as u64 {
        return Err(Error::UsageConflict(
          "promo code usage limit per user reached",
        ));
      }
    }

    let now = Utc::now().naive_utc();
    promo_code_usage::ActiveModel {
      id: NotSet,
      promo_code_id: Set(promo.id.clone()),
      user_id: Set(user_id.to_string()),
      order_id: Set(order_id.to_string()),
      discount_amount: Set(original_amount - final_amount),
      original_amount: Set(original_amount),
      final_amount: Set(final_amount),
      created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let order = order::Entity::find_by_id(order_id)
      .one(&txn)
      .await?
      .ok_or(Error::OrderNotFound)?;

    order::ActiveModel {
      original_amount: Set(original_amount),
      discount_amount: Set(original_amount - final_amount),
      final_amount: Set(final_amount),
      discount_code: Set(Some(promo.code.clone())),
      ..order.into()
    }
    .update(&txn)
    .await?;

    txn.commit().await?;

    debug!("Recorded usage of promo {} for order {}", promo.code, order_id);
    Ok(())
  }

  async fn user_usages(
    &self,
    promo_id: &str,
    user_id: &str,
    conn: &impl ConnectionTrait,
  ) -> Result<u64> {
    let count = promo_code_usage::Entity::find()
      .filter(promo_code_usage::Column::PromoCodeId.eq(promo_id))
      .filter(promo_code_usage::Column::UserId.eq(user_id))
      .count(conn)
      .await?;
    Ok(count)
  }
}
