use sea_orm_migration::prelude::*;

use super::m20260801_000003_create_ticket_types::TicketTypes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Orders::Table)
          .if_not_exists()
          .col(ColumnDef::new(Orders::Id).string().not_null().primary_key())
          .col(ColumnDef::new(Orders::UserId).string().not_null())
          .col(ColumnDef::new(Orders::TicketTypeId).string().not_null())
          .col(ColumnDef::new(Orders::Quantity).integer().not_null())
          .col(
            ColumnDef::new(Orders::OriginalAmount).big_integer().not_null(),
          )
          .col(
            ColumnDef::new(Orders::DiscountAmount)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(Orders::FinalAmount).big_integer().not_null())
          .col(ColumnDef::new(Orders::DiscountCode).string().null())
          .col(
            ColumnDef::new(Orders::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(ColumnDef::new(Orders::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_orders_ticket_type")
              .from(Orders::Table, Orders::TicketTypeId)
              .to(TicketTypes::Table, TicketTypes::Id)
              .on_delete(ForeignKeyAction::Restrict),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_orders_user")
          .table(Orders::Table)
          .col(Orders::UserId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Orders::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Orders {
  Table,
  Id,
  UserId,
  TicketTypeId,
  Quantity,
  OriginalAmount,
  DiscountAmount,
  FinalAmount,
  DiscountCode,
  Status,
  CreatedAt,
}
