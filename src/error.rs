pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error(transparent)]
  Db(#[from] sea_orm::DbErr),

  #[error(transparent)]
  Reject(#[from] Reject),

  #[error("Promo code not found")]
  PromoCodeNotFound,

  #[error("Courtesy request not found")]
  CourtesyRequestNotFound,

  #[error("Order not found")]
  OrderNotFound,

  #[error("Invalid arguments: {0}")]
  InvalidArgs(String),

  #[error("Usage recording conflict: {0}")]
  UsageConflict(&'static str),
}

/// Validation rejections. These are ordinary results surfaced verbatim to
/// the buyer, never operational failures; the resolver relies on the
/// distinction to fall back from the promo namespace to courtesy codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Reject {
  #[error("Promo code not found")]
  CodeNotFound,

  #[error("Promo code is not active")]
  NotActive,

  #[error("Promo code is not yet valid")]
  NotYetValid,

  #[error("Promo code has expired")]
  CodeExpired,

  #[error("Promo code usage limit reached")]
  UsageLimitReached,

  #[error("Promo code usage limit per user reached")]
  UserLimitReached,

  #[error("Ticket type not found")]
  TicketTypeNotFound,

  #[error("Promo code is not valid for this event")]
  EventMismatch,

  #[error("Promo code is not valid for this category")]
  CategoryMismatch,

  #[error("Promo code is not valid for this ticket type")]
  TicketTypeMismatch,

  #[error("Minimum order amount not met: requires {required} {currency}")]
  MinimumNotMet { required: i64, currency: String },

  #[error("Courtesy code not found or not valid")]
  CourtesyNotFound,

  #[error("Courtesy code has expired")]
  CourtesyExpired,

  #[error("Courtesy code has already been used")]
  AlreadyUsed,
}
