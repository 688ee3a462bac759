use sea_orm_migration::prelude::*;

use super::{
  m20260801_000001_create_categories::Categories,
  m20260801_000002_create_events::Events,
  m20260801_000003_create_ticket_types::TicketTypes,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(PromoCodes::Table)
          .if_not_exists()
          .col(ColumnDef::new(PromoCodes::Id).string().not_null().primary_key())
          .col(
            ColumnDef::new(PromoCodes::Code)
              .string()
              .not_null()
              .unique_key(),
          )
          .col(ColumnDef::new(PromoCodes::Name).string().not_null())
          .col(ColumnDef::new(PromoCodes::Description).string().null())
          .col(ColumnDef::new(PromoCodes::DiscountType).string().not_null())
          .col(ColumnDef::new(PromoCodes::Value).big_integer().not_null())
          .col(ColumnDef::new(PromoCodes::Currency).string().not_null())
          .col(
            ColumnDef::new(PromoCodes::Status)
              .string()
              .not_null()
              .default("active"),
          )
          .col(ColumnDef::new(PromoCodes::ValidFrom).date_time().not_null())
          .col(ColumnDef::new(PromoCodes::ValidUntil).date_time().null())
          .col(ColumnDef::new(PromoCodes::UsageLimit).integer().null())
          .col(ColumnDef::new(PromoCodes::UsageLimitPerUser).integer().null())
          .col(
            ColumnDef::new(PromoCodes::UsedCount)
              .integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(PromoCodes::MinOrderAmount).big_integer().null())
          .col(
            ColumnDef::new(PromoCodes::MaxDiscountAmount).big_integer().null(),
          )
          .col(ColumnDef::new(PromoCodes::EventId).string().null())
          .col(ColumnDef::new(PromoCodes::CategoryId).string().null())
          .col(ColumnDef::new(PromoCodes::TicketTypeId).string().null())
          .col(ColumnDef::new(PromoCodes::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_promo_codes_event")
              .from(PromoCodes::Table, PromoCodes::EventId)
              .to(Events::Table, Events::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_promo_codes_category")
              .from(PromoCodes::Table, PromoCodes::CategoryId)
              .to(Categories::Table, Categories::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_promo_codes_ticket_type")
              .from(PromoCodes::Table, PromoCodes::TicketTypeId)
              .to(TicketTypes::Table, TicketTypes::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_promo_codes_status")
          .table(PromoCodes::Table)
          .col(PromoCodes::Status)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(PromoCodes::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum PromoCodes {
  Table,
  Id,
  Code,
  Name,
  Description,
  DiscountType,
  Value,
  Currency,
  Status,
  ValidFrom,
  ValidUntil,
  UsageLimit,
  UsageLimitPerUser,
  UsedCount,
  MinOrderAmount,
  MaxDiscountAmount,
  EventId,
  CategoryId,
  TicketTypeId,
  CreatedAt,
}
