pub use std::sync::Arc;

pub use chrono::{NaiveDateTime as DateTime, Utc};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, Database,
  DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryFilter, Set,
  TransactionTrait, sea_query::Expr,
};
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Reject, Result};
