use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerPasswordResetToken::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerPasswordResetToken::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CustomerPasswordResetToken::CustomerId).text())
                    .col(
                        ColumnDef::new(CustomerPasswordResetToken::Email)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerPasswordResetToken::TokenHash)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerPasswordResetToken::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerPasswordResetToken::UsedAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(CustomerPasswordResetToken::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CustomerPasswordResetToken::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(CustomerPasswordResetToken::Table)
                    .col(CustomerPasswordResetToken::TokenHash)
                    .name("idx_customer_password_reset_token_token_hash")
                    .to_owned(),
            )
            .await?;

        // Invalidation path: WHERE email = ? AND used_at IS NULL.
        manager
            .create_index(
                Index::create()
                    .table(CustomerPasswordResetToken::Table)
                    .col(CustomerPasswordResetToken::Email)
                    .name("idx_customer_password_reset_token_email")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(CustomerPasswordResetToken::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum CustomerPasswordResetToken {
    Table,
    Id,
    CustomerId,
    Email,
    TokenHash,
    ExpiresAt,
    UsedAt,
    CreatedAt,
    UpdatedAt,
}
