use sea_orm_migration::prelude::*;

use super::m20260801_000004_create_promo_codes::PromoCodes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(PromoCodeUsages::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(PromoCodeUsages::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(PromoCodeUsages::PromoCodeId).string().not_null(),
          )
          .col(ColumnDef::new(PromoCodeUsages::UserId).string().not_null())
          .col(ColumnDef::new(PromoCodeUsages::OrderId).string().not_null())
          .col(
            ColumnDef::new(PromoCodeUsages::DiscountAmount)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(PromoCodeUsages::OriginalAmount)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(PromoCodeUsages::FinalAmount)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(PromoCodeUsages::CreatedAt).date_time().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_promo_code_usages_promo_code")
              .from(PromoCodeUsages::Table, PromoCodeUsages::PromoCodeId)
              .to(PromoCodes::Table, PromoCodes::Id)
              .on_delete(ForeignKeyAction::Restrict),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_promo_code_usages_code_user")
          .table(PromoCodeUsages::Table)
          .col(PromoCodeUsages::PromoCodeId)
          .col(PromoCodeUsages::UserId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(PromoCodeUsages::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum PromoCodeUsages {
  Table,
  Id,
  PromoCodeId,
  UserId,
  OrderId,
  DiscountAmount,
  OriginalAmount,
  FinalAmount,
  CreatedAt,
}
