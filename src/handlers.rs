use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
  entity::{CourtesyType, PromoStatus},
  prelude::*,
  state::AppState,
  sv::{self, promo::CreatePromo},
};

#[derive(Serialize)]
pub struct Status {
  success: bool,
  msg: Option<String>,
}

impl Status {
  fn ok() -> Json<Self> {
    Json(Self { success: true, msg: None })
  }

  fn fail(msg: impl Into<String>) -> Json<Self> {
    Json(Self { success: false, msg: Some(msg.into()) })
  }
}

pub async fn health() -> Json<json::Value> {
  Json(json::json!({ "status": "ok" }))
}

#[derive(Deserialize)]
pub struct ResolveReq {
  pub code: String,
  pub user_id: String,
  pub ticket_type_id: String,
  pub quantity: i32,
}

#[derive(Serialize)]
pub struct ResolveResp {
  pub is_valid: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind: Option<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub code: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub discount_amount: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub final_amount: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub discount_percentage: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub code_ref: Option<String>,
}

impl ResolveResp {
  fn valid(resolution: &sv::Resolution) -> Self {
    Self {
      is_valid: true,
      error: None,
      kind: Some(resolution.kind()),
      code: Some(resolution.code().to_string()),
      name: Some(resolution.name().to_string()),
      description: resolution.description(),
      discount_amount: Some(resolution.discount_amount()),
      final_amount: Some(resolution.final_amount()),
      discount_percentage: Some(resolution.discount_percentage()),
      code_ref: Some(resolution.code_ref().to_string()),
    }
  }

  fn invalid(error: String) -> Self {
    Self {
      is_valid: false,
      error: Some(error),
      kind: None,
      code: None,
      name: None,
      description: None,
      discount_amount: None,
      final_amount: None,
      discount_percentage: None,
      code_ref: None,
    }
  }
}

pub async fn resolve_discount(
  State(app): State<Arc<AppState>>,
  Json(req): Json<ResolveReq>,
) -> (StatusCode, Json<ResolveResp>) {
  let result = sv::Resolver::new(&app.db)
    .resolve(&req.code, &req.user_id, &req.ticket_type_id, req.quantity)
    .await;

  match result {
    Ok(resolution) => (StatusCode::OK, Json(ResolveResp::valid(&resolution))),
    Err(Error::Reject(reject)) => {
      (StatusCode::OK, Json(ResolveResp::invalid(reject.to_string())))
    }
    Err(Error::InvalidArgs(msg)) => {
      (StatusCode::BAD_REQUEST, Json(ResolveResp::invalid(msg)))
    }
    Err(err) => {
      error!("Discount resolution failed: {err}");
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ResolveResp::invalid("Internal error".into())),
      )
    }
  }
}

#[derive(Deserialize)]
pub struct ApplyReq {
  pub code: String,
  pub user_id: String,
  pub ticket_type_id: String,
  pub quantity: i32,
  pub order_id: String,
}

/// Records a redemption for an already-paid order. A failure here never
/// touches the payment; it is reported so operators can reconcile.
pub async fn apply_discount(
  State(app): State<Arc<AppState>>,
  Json(req): Json<ApplyReq>,
) -> (StatusCode, Json<Status>) {
  let resolver = sv::Resolver::new(&app.db);

  let resolution = match resolver
    .resolve(&req.code, &req.user_id, &req.ticket_type_id, req.quantity)
    .await
  {
    Ok(resolution) => resolution,
    Err(Error::Reject(reject)) => {
      return (StatusCode::CONFLICT, Status::fail(reject.to_string()));
    }
    Err(Error::InvalidArgs(msg)) => {
      return (StatusCode::BAD_REQUEST, Status::fail(msg));
    }
    Err(err) => {
      error!("Discount resolution failed: {err}");
      return (
        StatusCode::INTERNAL_SERVER_ERROR,
        Status::fail("Internal error"),
      );
    }
  };

  match resolver
    .apply_usage(
      &resolution,
      &req.user_id,
      &req.order_id,
      resolution.original_amount(),
      resolution.final_amount(),
    )
    .await
  {
    Ok(()) => (StatusCode::OK, Status::ok()),
    Err(err) => {
      error!(
        "Discount bookkeeping failed for order {}: {err}",
        req.order_id
      );
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Status::fail("Discount bookkeeping failed"),
      )
    }
  }
}

pub async fn create_promo(
  State(app): State<Arc<AppState>>,
  Json(req): Json<CreatePromo>,
) -> (StatusCode, Json<json::Value>) {
  match sv::Promo::new(&app.db).create(req).await {
    Ok(promo) => (StatusCode::CREATED, Json(json::json!(promo))),
    Err(Error::InvalidArgs(msg)) => {
      (StatusCode::BAD_REQUEST, Json(json::json!({ "error": msg })))
    }
    Err(err) => {
      error!("Promo creation failed: {err}");
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json::json!({ "error": "Internal error" })),
      )
    }
  }
}

#[derive(Deserialize)]
pub struct PromoStatusReq {
  pub status: PromoStatus,
}

pub async fn set_promo_status(
  State(app): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(req): Json<PromoStatusReq>,
) -> (StatusCode, Json<Status>) {
  match sv::Promo::new(&app.db).set_status(&id, req.status).await {
    Ok(()) => (StatusCode::OK, Status::ok()),
    Err(Error::PromoCodeNotFound) => {
      (StatusCode::NOT_FOUND, Status::fail("Promo code not found"))
    }
    Err(err) => {
      error!("Promo status update failed: {err}");
      (StatusCode::INTERNAL_SERVER_ERROR, Status::fail("Internal error"))
    }
  }
}

#[derive(Deserialize)]
pub struct CourtesyReq {
  pub event_id: String,
  pub requester_name: String,
  pub requester_email: String,
  pub code_type: CourtesyType,
  pub discount_value: Option<i64>,
}

pub async fn request_courtesy(
  State(app): State<Arc<AppState>>,
  Json(req): Json<CourtesyReq>,
) -> (StatusCode, Json<json::Value>) {
  let result = sv::Courtesy::new(&app.db)
    .request(
      &req.event_id,
      &req.requester_name,
      &req.requester_email,
      req.code_type,
      req.discount_value,
    )
    .await;

  match result {
    Ok(request) => (StatusCode::CREATED, Json(json::json!(request))),
    Err(Error::InvalidArgs(msg)) => {
      (StatusCode::BAD_REQUEST, Json(json::json!({ "error": msg })))
    }
    Err(err) => {
      error!("Courtesy request failed: {err}");
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json::json!({ "error": "Internal error" })),
      )
    }
  }
}

#[derive(Deserialize)]
pub struct ApproveReq {
  pub expires_at: Option<DateTime>,
}

pub async fn approve_courtesy(
  State(app): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(req): Json<ApproveReq>,
) -> (StatusCode, Json<json::Value>) {
  match sv::Courtesy::new(&app.db).approve(&id, req.expires_at).await {
    Ok(request) => (StatusCode::OK, Json(json::json!(request))),
    Err(Error::CourtesyRequestNotFound) => (
      StatusCode::NOT_FOUND,
      Json(json::json!({ "error": "Courtesy request not found" })),
    ),
    Err(Error::InvalidArgs(msg)) => {
      (StatusCode::BAD_REQUEST, Json(json::json!({ "error": msg })))
    }
    Err(err) => {
      error!("Courtesy approval failed: {err}");
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json::json!({ "error": "Internal error" })),
      )
    }
  }
}

pub async fn reject_courtesy(
  State(app): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> (StatusCode, Json<Status>) {
  match sv::Courtesy::new(&app.db).reject(&id).await {
    Ok(()) => (StatusCode::OK, Status::ok()),
    Err(Error::CourtesyRequestNotFound) => {
      (StatusCode::NOT_FOUND, Status::fail("Courtesy request not found"))
    }
    Err(Error::InvalidArgs(msg)) => {
      (StatusCode::BAD_REQUEST, Status::fail(msg))
    }
    Err(err) => {
      error!("Courtesy rejection failed: {err}");
      (StatusCode::INTERNAL_SERVER_ERROR, Status::fail("Internal error"))
    }
  }
}
