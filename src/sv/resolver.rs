use crate::{
  prelude::*,
  sv::{
    courtesy::{Courtesy, CourtesyDiscount},
    promo::{Promo, PromoDiscount},
  },
};

pub struct Resolver<'a> {
  db: &'a DatabaseConnection,
}

/// One discount, whichever namespace it came from. The two arms keep their
/// own records and lifecycle; only the quoted amounts share a shape.
#[derive(Debug)]
pub enum Resolution {
  Promo(PromoDiscount),
  Courtesy(CourtesyDiscount),
}

impl Resolution {
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Promo(_) => "PROMO_CODE",
      Self::Courtesy(_) => "COURTESY_CODE",
    }
  }

  pub fn code(&self) -> &str {
    match self {
      Self::Promo(p) => &p.promo.code,
      Self::Courtesy(c) => c.request.code.as_deref().unwrap_or_default(),
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Self::Promo(p) => &p.promo.name,
      Self::Courtesy(_) => "Courtesy code",
    }
  }

  pub fn description(&self) -> Option<String> {
    match self {
      Self::Promo(p) => p.promo.description.clone(),
      Self::Courtesy(c) => Some(c.description.clone()),
    }
  }

  /// Id of the underlying promo code or courtesy request record.
  pub fn code_ref(&self) -> &str {
    match self {
      Self::Promo(p) => &p.promo.id,
      Self::Courtesy(c) => &c.request.id,
    }
  }

  pub fn discount_amount(&self) -> i64 {
    match self {
      Self::Promo(p) => p.discount_amount,
      Self::Courtesy(c) => c.discount_amount,
    }
  }

  pub fn final_amount(&self) -> i64 {
    match self {
      Self::Promo(p) => p.final_amount,
      Self::Courtesy(c) => c.final_amount,
    }
  }

  pub fn discount_percentage(&self) -> f64 {
    match self {
      Self::Promo(p) => p.discount_percentage,
      Self::Courtesy(c) => c.discount_percentage,
    }
  }

  pub fn original_amount(&self) -> i64 {
    self.discount_amount() + self.final_amount()
  }
}

impl<'a> Resolver<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Tries the promo namespace first, then courtesy. When both reject, the
  /// promo rejection is the one surfaced: promo is the primary namespace,
  /// and codes never collide across the two (enforced at creation and
  /// approval time).
  ///
  /// Store failures propagate from either path untouched.
  pub async fn resolve(
    &self,
    code: &str,
    user_id: &str,
    ticket_type_id: &str,
    quantity: i32,
  ) -> Result<Resolution> {
    let promo_reject = match Promo::new(self.db)
      .validate(code, user_id, ticket_type_id, quantity)
      .await
    {
      Ok(found) => return Ok(Resolution::Promo(found)),
      Err(Error::Reject(reject)) => reject,
      Err(err) => return Err(err),
    };

    match Courtesy::new(self.db)
      .validate(code, ticket_type_id, quantity)
      .await
    {
      Ok(found) => Ok(Resolution::Courtesy(found)),
      Err(Error::Reject(_)) => Err(promo_reject.into()),
      Err(err) => Err(err),
    }
  }

  /// Books the redemption after payment is confirmed, against whichever
  /// mechanism resolved. Errors here mean the payment stands but discount
  /// bookkeeping failed; callers must surface them, never swallow them.
  pub async fn apply_usage(
    &self,
    resolution: &Resolution,
    user_id: &str,
    order_id: &str,
    original_amount: i64,
    final_amount: i64,
  ) -> Result<()> {
    match resolution {
      Resolution::Promo(found) => {
        Promo::new(self.db)
          .record_usage(
            &found.promo,
            user_id,
            order_id,
            original_amount,
            final_amount,
          )
          .await
      }
      Resolution::Courtesy(found) => {
        Courtesy::new(self.db).redeem(&found.request.id).await
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    entity::*,
    sv::test_utils::{fixtures, test_db},
  };

  #[tokio::test]
  async fn test_resolves_promo_namespace_first() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 1000).await;
    fixtures::promo("SAVE10").insert(&db).await.unwrap();

    let resolution = Resolver::new(&db)
      .resolve("SAVE10", "alice", &ticket.id, 1)
      .await
      .unwrap();

    assert_eq!(resolution.kind(), "PROMO_CODE");
    assert_eq!(resolution.code(), "SAVE10");
    assert_eq!(resolution.discount_amount(), 100);
    assert_eq!(resolution.final_amount(), 900);
    assert_eq!(resolution.original_amount(), 1000);
  }

  #[tokio::test]
  async fn test_falls_back_to_courtesy() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 15000).await;
    fixtures::courtesy(&ticket.event_id, "COMPVIP", CourtesyType::Free, None)
      .insert(&db)
      .await
      .unwrap();

    let resolution = Resolver::new(&db)
      .resolve("compvip", "alice", &ticket.id, 1)
      .await
      .unwrap();

    assert_eq!(resolution.kind(), "COURTESY_CODE");
    assert_eq!(resolution.code(), "COMPVIP");
    assert_eq!(resolution.final_amount(), 0);
    assert_eq!(resolution.discount_percentage(), 100.0);
    assert_eq!(resolution.description().as_deref(), Some("Free admission"));
  }

  #[tokio::test]
  async fn test_unknown_code_surfaces_promo_rejection() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 1000).await;

    let result =
      Resolver::new(&db).resolve("GHOST", "alice", &ticket.id, 1).await;

    match result {
      Err(Error::Reject(reject)) => {
        assert_eq!(reject, Reject::CodeNotFound);
        assert_eq!(reject.to_string(), "Promo code not found");
      }
      other => panic!("expected promo rejection, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn test_apply_usage_for_promo() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 1000).await;

    let mut promo = fixtures::promo("APPLYME");
    promo.usage_limit = Set(Some(5));
    promo.insert(&db).await.unwrap();

    let order = fixtures::order(&db, "alice", &ticket, 2).await;

    let sv = Resolver::new(&db);
    let resolution =
      sv.resolve("APPLYME", "alice", &ticket.id, 2).await.unwrap();

    sv.apply_usage(
      &resolution,
      "alice",
      &order.id,
      resolution.original_amount(),
      resolution.final_amount(),
    )
    .await
    .unwrap();

    let order =
      order::Entity::find_by_id(&order.id).one(&db).await.unwrap().unwrap();
    assert_eq!(order.discount_amount, 200);
    assert_eq!(order.final_amount, 1800);

    let promo = promo_code::Entity::find()
      .filter(promo_code::Column::Code.eq("APPLYME"))
      .one(&db)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(promo.used_count, 1);
  }

  #[tokio::test]
  async fn test_apply_usage_for_courtesy() {
    let db = test_db::setup().await;
    let ticket = fixtures::event_with_ticket(&db, 15000).await;
    fixtures::courtesy(&ticket.event_id, "COMPDONE", CourtesyType::Free, None)
      .insert(&db)
      .await
      .unwrap();
    let order = fixtures::order(&db, "alice", &ticket, 1).await;

    let sv = Resolver::new(&db);
    let resolution =
      sv.resolve("COMPDONE", "alice", &ticket.id, 1).await.unwrap();

    sv.apply_usage(&resolution, "alice", &order.id, 15000, 0).await.unwrap();

    // the request is spent; the next lookup falls through to the promo
    // namespace's not-found message
    let result = sv.resolve("COMPDONE", "alice", &ticket.id, 1).await;
    assert!(matches!(result, Err(Error::Reject(Reject::CodeNotFound))));

    // and a second bookkeeping attempt must fail loudly
    assert!(matches!(
      sv.apply_usage(&resolution, "alice", &order.id, 15000, 0).await,
      Err(Error::UsageConflict(_))
    ));
  }
}

