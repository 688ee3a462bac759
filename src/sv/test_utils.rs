//! Shared test utilities for database setup


#[cfg(test)]
pub mod fixtures {
  use uuid::Uuid;

  use crate::{entity::*, prelude::*};

  /// Seeds a category, an event in it, and one ticket type at `price`.
  pub async fn event_with_ticket(
    db: &DatabaseConnection,
    price: i64,
  ) -> ticket_type::Model {
    let now = Utc::now().naive_utc();

    let category = category::ActiveModel {
      id: Set(Uuid::new_v4().to_string()),
      name: Set("Music".into()),
      created_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap();

    let event = event::ActiveModel {
      id: Set(Uuid::new_v4().to_string()),
      category_id: Set(category.id),
      name: Set("Summer Fest".into()),
      starts_at: Set(now + chrono::TimeDelta::days(30)),
      created_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap();

    ticket_type::ActiveModel {
      id: Set(Uuid::new_v4().to_string()),
      event_id: Set(event.id),
      name: Set("General admission".into()),
      price: Set(price),
      currency: Set("USD".into()),
      created_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
  }

  /// Active percentage promo with no limits or scoping; tests override the
  /// fields they care about before inserting.
  pub fn promo(code: &str) -> promo_code::ActiveModel {
    let now = Utc::now().naive_utc();
    promo_code::ActiveModel {
      id: Set(Uuid::new_v4().to_string()),
      code: Set(code.to_string()),
      name: Set(format!("Promo {code}")),
      description: Set(None),
      discount_type: Set(DiscountType::Percentage),
      value: Set(10),
      currency: Set("USD".into()),
      status: Set(PromoStatus::Active),
      valid_from: Set(now - chrono::TimeDelta::days(1)),
      valid_until: Set(None),
      usage_limit: Set(None),
      usage_limit_per_user: Set(None),
      used_count: Set(0),
      min_order_amount: Set(None),
      max_discount_amount: Set(None),
      event_id: Set(None),
      category_id: Set(None),
      ticket_type_id: Set(None),
      created_at: Set(now),
    }
  }

  /// Approved courtesy code for `event_id`, non-expiring.
  pub fn courtesy(
    event_id: &str,
    code: &str,
    code_type: CourtesyType,
    discount_value: Option<i64>,
  ) -> courtesy_request::ActiveModel {
    let now = Utc::now().naive_utc();
    courtesy_request::ActiveModel {
      id: Set(Uuid::new_v4().to_string()),
      event_id: Set(event_id.to_string()),
      requester_name: Set("Guest".into()),
      requester_email: Set("guest@example.com".into()),
      code: Set(Some(code.to_string())),
      code_type: Set(code_type),
      discount_value: Set(discount_value),
      status: Set(CourtesyStatus::Approved),
      expires_at: Set(None),
      used_at: Set(None),
      created_at: Set(now),
    }
  }

  /// Pending order for the apply-usage paths.
  pub async fn order(
    db: &DatabaseConnection,
    user_id: &str,
    ticket: &ticket_type::Model,
    quantity: i32,
  ) -> order::Model {
    let now = Utc::now().naive_utc();
    let total = ticket.price * i64::from(quantity);
    order::ActiveModel {
      id: Set(Uuid::new_v4().to_string()),
      user_id: Set(user_id.to_string()),
      ticket_type_id: Set(ticket.id.clone()),
      quantity: Set(quantity),
      original_amount: Set(total),
      discount_amount: Set(0),
      final_amount: Set(total),
      discount_code: Set(None),
      status: Set(OrderStatus::Pending),
      created_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
  }
}
