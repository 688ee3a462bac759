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
          .table(TicketTypes::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(TicketTypes::Id).string().not_null().primary_key(),
          )
          .col(ColumnDef::new(TicketTypes::EventId).string().not_null())
          .col(ColumnDef::new(TicketTypes::Name).string().not_null())
          .col(ColumnDef::new(TicketTypes::Price).big_integer().not_null())
          .col(ColumnDef::new(TicketTypes::Currency).string().not_null())
          .col(ColumnDef::new(TicketTypes::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_ticket_types_event")
              .from(TicketTypes::Table, TicketTypes::EventId)
              .to(Events::Table, Events::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_ticket_types_event")
          .table(TicketTypes::Table)
          .col(TicketTypes::EventId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(TicketTypes::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum TicketTypes {
  Table,
  Id,
  EventId,
  Name,
  Price,
  Currency,
  CreatedAt,
}
