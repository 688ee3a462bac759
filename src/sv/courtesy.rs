use uuid::Uuid;

use crate::{
  entity::{
    CourtesyStatus, CourtesyType, DiscountType, courtesy_request, event,
    promo_code, ticket_type,
  },
  prelude::*,
  sv::discount,
  utils,
};

pub struct Courtesy<'a> {
  db: &'a DatabaseConnection,
}

/// Successful courtesy validation: the request record plus totals for the
/// whole requested quantity.
#[derive(Debug)]
pub struct CourtesyDiscount {
  pub request: courtesy_request::Model,
  pub description: String,
  pub discount_amount: i64,
  pub final_amount: i64,
  pub discount_percentage: f64,
}

impl<'a> Courtesy<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn request(
    &self,
    event_id: &str,
    requester_name: &str,
    requester_email: &str,
    code_type: CourtesyType,
    discount_value: Option<i64>,
  ) -> Result<courtesy_request::Model> {
    event::Entity::find_by_id(event_id)
      .one(self.db)
      .await?
      .ok_or_else(|| Error::InvalidArgs("Event not found".into()))?;

    if code_type == CourtesyType::Discount && discount_value.unwrap_or(0) <= 0
    {
      return Err(Error::InvalidArgs(
        "Discount value must be positive".into(),
      ));
    }

    let now = Utc::now().naive_utc();
    let request = courtesy_request::ActiveModel {
      id: Set(Uuid::new_v4().to_string()),
      event_id: Set(event_id.to_string()),
      requester_name: Set(requester_name.to_string()),
      requester_email: Set(requester_email.to_string()),
      code: Set(None),
      code_type: Set(code_type),
      discount_value: Set(discount_value),
      status: Set(CourtesyStatus::Pending),
      expires_at: Set(None),
      used_at: Set(None),
      created_at: Set(now),
    };

    Ok(request.insert(self.db).await?)
  }

  /// Approves a pending request, assigning a code unique across both the
  /// promo and courtesy namespaces.
  pub async fn approve(
    &self,
    request_id: &str,
    expires_at: Option<DateTime>,
  ) -> Result<courtesy_request::Model> {
    let request = courtesy_request::Entity::find_by_id(request_id)
      .one(self.db)
      .await?
      .ok_or(Error::CourtesyRequestNotFound)?;

    if request.status != CourtesyStatus::Pending {
      return Err(Error::InvalidArgs(
        "Courtesy request has already been reviewed".into(),
      ));
    }

    let code = loop {
      let candidate = utils::generate_code();
      let taken = promo_code::Entity::find()
        .filter(promo_code::Column::Code.eq(&candidate))
        .one(self.db)
        .await?
        .is_some()
        || courtesy_request::Entity::find()
          .filter(courtesy_request::Column::Code.eq(&candidate))
          .one(self.db)
          .await?
          .is_some();
      if !taken {
        break candidate;
      }
    };

    let approved = courtesy_request::ActiveModel {
      code: Set(Some(code)),
      status: Set(CourtesyStatus::Approved),
      expires_at: Set(expires_at),
      ..request.into()
    }
    .update(self.db)
    .await?;

    info!(
      "Approved courtesy request {} for event {}",
      approved.id, approved.event_id
    );
    Ok(approved)
  }

  pub async fn reject(&self, request_id: &str) -> Result<()> {
    let request = courtesy_request::Entity::find_by_id(request_id)
      .one(self.db)
      .await?
      .ok_or(Error::CourtesyRequestNotFound)?;

    if request.status != CourtesyStatus::Pending {
      return Err(Error::InvalidArgs(
        "Courtesy request has already been reviewed".into(),
      ));
    }

    courtesy_request::ActiveModel {
      status: Set(CourtesyStatus::Rejected),
      ..request.into()
    }
    .update(self.db)
    .await?;

    Ok(())
  }

  /// Checks a courtesy code against a ticket purchase. The code is a bearer
  /// token: no user binding. Scoping to the ticket's event and the approved
  /// state are enforced by a single compound lookup.
  pub async fn validate(
    &self,
    code: &str,
    ticket_type_id: &str,
    quantity: i32,
  ) -> Result<CourtesyDiscount> {
    if quantity <= 0 {
      return Err(Error::InvalidArgs("Quantity must be positive".into()));
    }

    let ticket = ticket_type::Entity::find_by_id(ticket_type_id)
      .one(self.db)
      .await?
      .ok_or(Reject::TicketTypeNotFound)?;

    let request = courtesy_request::Entity::find()
      .filter(courtesy_request::Column::Code.eq(utils::normalize_code(code)))
      .filter(courtesy_request::Column::EventId.eq(&ticket.event_id))
      .filter(courtesy_request::Column::Status.eq(CourtesyStatus::Approved))
      .one(self.db)
      .await?
      .ok_or(Reject::CourtesyNotFound)?;

    let now = Utc::now().naive_utc();
    if let Some(expires) = request.expires_at
      && now > expires
    {
      // Expiry has no other clock: persist the transition on sight, the one
      // sanctioned write in an otherwise read-only validation.
      courtesy_request::Entity::update_many()
        .set(courtesy_request::ActiveModel {
          status: Set(CourtesyStatus::Expired),
          ..Default::default()
        })
        .filter(courtesy_request::Column::Id.eq(&request.id))
        .filter(
          courtesy_request::Column::Status.eq(CourtesyStatus::Approved),
        )
        .exec(self.db)
        .await?;
      return Err(Reject::CourtesyExpired.into());
    }

    // The lookup filtered on approved, but a racing redemption may have
    // flipped the row since; keep the re-check.
    if request.status == CourtesyStatus::Used {
      return Err(Reject::AlreadyUsed.into());
    }

    let rule = match request.code_type {
      CourtesyType::Free => discount::Rule {
        discount_type: DiscountType::Free,
        value: 0,
        max_discount_amount: None,
      },
      CourtesyType::Discount => discount::Rule {
        discount_type: DiscountType::FixedAmount,
        value: request.discount_value.unwrap_or(0),
        max_discount_amount: None,
      },
    };
    let per = discount::per_ticket(ticket.price, &rule);

    let description = match request.code_type {
      CourtesyType::Free => "Free admission".to_string(),
      CourtesyType::Discount => format!(
        "Discount of {}",
        utils::format_amount(
          request.discount_value.unwrap_or(0),
          &ticket.currency
        )
      ),
    };

    let quantity = i64::from(quantity);
    let base_total = ticket.price * quantity;
    let discount_amount = per.discount_amount * quantity;
    let final_amount = per.final_amount * quantity;

    Ok(CourtesyDiscount {
      request,
      description,
      discount_amount,
      final_amount,
      discount_percentage: discount::percent_of(discount_amount, base_total),
    })
  }

  /// Marks an approved code used, exactly once. Compare-and-swap on the
  /// approved status: a zero-row update means another redemption won.
  pub async fn redeem(&self, request_id: &str) -> Result<()> {
    let now = Utc::now().naive_utc();
    let updated = courtesy_request::Entity::update_many()
      .set(courtesy_request::ActiveModel {
        status: Set(CourtesyStatus::Used),
        used_at: Set(Some(now)),
        ..Default::default()
      })
      .filter(courtesy_request::Column::Id.eq(request_id))
      .filter(courtesy_request::Column::Status.eq(CourtesyStatus::Approved))
      .exec(self.db)
      .await?;

    if updated.rows_affected == 0 {
      return Err(Error::UsageConflict("courtesy code already redeemed"));
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::test_utils::{fixtures, test_db};

  #[tokio::test]
  async fn test_free_code_waives_everything() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 15000).await;
    fixtures::courtesy(&ticket.event_id, "COMPFREE", CourtesyType::Free, None)
      .insert(&db)
      .await
      .unwrap();

    let found = Courtesy::new(&db)
      .validate("COMPFREE", &ticket.id, 1)
      .await
      .unwrap();

    assert_eq!(found.discount_amount, 15000);
    assert_eq!(found.final_amount, 0);
    assert_eq!(found.discount_percentage, 100.0);
    assert_eq!(found.description, "Free admission");
  }

  #[tokio::test]
  async fn test_discount_code_is_per_ticket() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 8000).await;
    fixtures::courtesy(
      &ticket.event_id,
      "COMP3K",
      CourtesyType::Discount,
      Some(3000),
    )
    .insert(&db)
    .await
    .unwrap();

    let found =
      Courtesy::new(&db).validate("comp3k", &ticket.id, 2).await.unwrap();

    assert_eq!(found.discount_amount, 6000);
    assert_eq!(found.final_amount, 10000);
    assert_eq!(found.description, "Discount of 30.00 USD");
  }

  #[tokio::test]
  async fn test_discount_capped_at_ticket_price() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 8000).await;
    fixtures::courtesy(
      &ticket.event_id,
      "COMPBIG",
      CourtesyType::Discount,
      Some(10000),
    )
    .insert(&db)
    .await
    .unwrap();

    let found =
      Courtesy::new(&db).validate("COMPBIG", &ticket.id, 3).await.unwrap();

    assert_eq!(found.discount_amount, 24000);
    assert_eq!(found.final_amount, 0);
  }

  #[tokio::test]
  async fn test_pending_code_is_invisible() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 1000).await;

    let mut request = fixtures::courtesy(
      &ticket.event_id,
      "NOTYET",
      CourtesyType::Free,
      None,
    );
    request.status = Set(CourtesyStatus::Pending);
    request.insert(&db).await.unwrap();

    let result = Courtesy::new(&db).validate("NOTYET", &ticket.id, 1).await;

    assert!(matches!(result, Err(Error::Reject(Reject::CourtesyNotFound))));
  }

  #[tokio::test]
  async fn test_scoped_to_its_event() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 1000).await;
    let other_ticket = fixtures::event_with_ticket(&db, 1000).await;

    fixtures::courtesy(&ticket.event_id, "COMPHERE", CourtesyType::Free, None)
      .insert(&db)
      .await
      .unwrap();

    let sv = Courtesy::new(&db);
    assert!(sv.validate("COMPHERE", &ticket.id, 1).await.is_ok());
    assert!(matches!(
      sv.validate("COMPHERE", &other_ticket.id, 1).await,
      Err(Error::Reject(Reject::CourtesyNotFound))
    ));
  }

  #[tokio::test]
  async fn test_lazy_expiry_is_persisted() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 1000).await;

    let mut request = fixtures::courtesy(
      &ticket.event_id,
      "COMPOLD",
      CourtesyType::Free,
      None,
    );
    request.expires_at =
      Set(Some(Utc::now().naive_utc() - chrono::TimeDelta::days(1)));
    let request = request.insert(&db).await.unwrap();

    let result = Courtesy::new(&db).validate("COMPOLD", &ticket.id, 1).await;
    assert!(matches!(result, Err(Error::Reject(Reject::CourtesyExpired))));

    let request = courtesy_request::Entity::find_by_id(&request.id)
      .one(&db)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(request.status, CourtesyStatus::Expired);
  }

  #[tokio::test]
  async fn test_redeems_exactly_once() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 1000).await;
    let request =
      fixtures::courtesy(&ticket.event_id, "COMPONCE", CourtesyType::Free, None)
        .insert(&db)
        .await
        .unwrap();

    let sv = Courtesy::new(&db);
    sv.redeem(&request.id).await.unwrap();

    let request = courtesy_request::Entity::find_by_id(&request.id)
      .one(&db)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(request.status, CourtesyStatus::Used);
    assert!(request.used_at.is_some());

    // the compare-and-swap refuses a second redemption
    assert!(matches!(
      sv.redeem(&request.id).await,
      Err(Error::UsageConflict(_))
    ));

    // and the code no longer resolves
    assert!(matches!(
      sv.validate("COMPONCE", &ticket.id, 1).await,
      Err(Error::Reject(Reject::CourtesyNotFound))
    ));
  }

  #[tokio::test]
  async fn test_request_review_lifecycle() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 1000).await;

    let sv = Courtesy::new(&db);
    let request = sv
      .request(
        &ticket.event_id,
        "Ada",
        "ada@example.com",
        CourtesyType::Free,
        None,
      )
      .await
      .unwrap();
    assert_eq!(request.status, CourtesyStatus::Pending);
    assert!(request.code.is_none());

    let approved = sv.approve(&request.id, None).await.unwrap();
    assert_eq!(approved.status, CourtesyStatus::Approved);
    let code = approved.code.expect("approval assigns a code");
    assert_eq!(code, code.to_uppercase());

    // a reviewed request cannot be re-reviewed
    assert!(matches!(
      sv.reject(&approved.id).await,
      Err(Error::InvalidArgs(_))
    ));

    let found = sv.validate(&code, &ticket.id, 1).await.unwrap();
    assert_eq!(found.final_amount, 0);
  }
}

