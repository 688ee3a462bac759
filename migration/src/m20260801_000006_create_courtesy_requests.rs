use sea_orm_migration::prelude::*;

use super::m20260801_000002_create_events::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(CourtesyRequests::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(CourtesyRequests::Id)
              .string()
              .not_null()
              .primary_key(),
          )
          .col(ColumnDef::new(CourtesyRequests::EventId).string().not_null())
          .col(
            ColumnDef::new(CourtesyRequests::RequesterName)
              .string()
              .not_null(),
          )
          .col(
            ColumnDef::new(CourtesyRequests::RequesterEmail)
              .string()
              .not_null(),
          )
          .col(ColumnDef::new(CourtesyRequests::Code).string().null())
          .col(ColumnDef::new(CourtesyRequests::CodeType).string().not_null())
          .col(
            ColumnDef::new(CourtesyRequests::DiscountValue)
              .big_integer()
              .null(),
          )
          .col(
            ColumnDef::new(CourtesyRequests::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(ColumnDef::new(CourtesyRequests::ExpiresAt).date_time().null())
          .col(ColumnDef::new(CourtesyRequests::UsedAt).date_time().null())
          .col(
            ColumnDef::new(CourtesyRequests::CreatedAt).date_time().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_courtesy_requests_event")
              .from(CourtesyRequests::Table, CourtesyRequests::EventId)
              .to(Events::Table, Events::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_courtesy_requests_code_event")
          .table(CourtesyRequests::Table)
          .col(CourtesyRequests::Code)
          .col(CourtesyRequests::EventId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(CourtesyRequests::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum CourtesyRequests {
  Table,
  Id,
  EventId,
  RequesterName,
  RequesterEmail,
  Code,
  CodeType,
  DiscountValue,
  Status,
  ExpiresAt,
  UsedAt,
  CreatedAt,
}
