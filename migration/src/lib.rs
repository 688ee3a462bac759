pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_categories;
mod m20260801_000002_create_events;
mod m20260801_000003_create_ticket_types;
mod m20260801_000004_create_promo_codes;
mod m20260801_000005_create_promo_code_usages;
mod m20260801_000006_create_courtesy_requests;
mod m20260801_000007_create_orders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260801_000001_create_categories::Migration),
      Box::new(m20260801_000002_create_events::Migration),
      Box::new(m20260801_000003_create_ticket_types::Migration),
      Box::new(m20260801_000004_create_promo_codes::Migration),
      Box::new(m20260801_000005_create_promo_code_usages::Migration),
      Box::new(m20260801_000006_create_courtesy_requests::Migration),
      Box::new(m20260801_000007_create_orders::Migration),
    ]
  }
}
