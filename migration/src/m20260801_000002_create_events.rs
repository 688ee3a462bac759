use sea_orm_migration::prelude::*;

use super::m20260801_000001_create_categories::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Events::Table)
          .if_not_exists()
          .col(ColumnDef::new(Events::Id).string().not_null().primary_key())
          .col(ColumnDef::new(Events::CategoryId).string().not_null())
          .col(ColumnDef::new(Events::Name).string().not_null())
          .col(ColumnDef::new(Events::StartsAt).date_time().not_null())
          .col(ColumnDef::new(Events::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_events_category")
              .from(Events::Table, Events::CategoryId)
              .to(Categories::Table, Categories::Id)
              .on_delete(ForeignKeyAction::Restrict),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_events_category")
          .table(Events::Table)
          .col(Events::CategoryId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Events::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Events {
  Table,
  Id,
  CategoryId,
  Name,
  StartsAt,
  CreatedAt,
}
