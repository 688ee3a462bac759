use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Categories::Table)
          .if_not_exists()
          .col(ColumnDef::new(Categories::Id).string().not_null().primary_key())
          .col(ColumnDef::new(Categories::Name).string().not_null())
          .col(ColumnDef::new(Categories::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Categories::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Categories {
  Table,
  Id,
  Name,
  CreatedAt,
}
