use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerEmailVerification::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerEmailVerification::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CustomerEmailVerification::CustomerId).text())
                    .col(
                        ColumnDef::new(CustomerEmailVerification::Email)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerEmailVerification::Code)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerEmailVerification::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerEmailVerification::Verified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CustomerEmailVerification::VerifiedAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(CustomerEmailVerification::ConsumedAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(CustomerEmailVerification::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CustomerEmailVerification::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Pending-lookup path: WHERE email = ? AND verified = false ORDER BY created_at DESC.
        manager
            .create_index(
                Index::create()
                    .table(CustomerEmailVerification::Table)
                    .col(CustomerEmailVerification::Email)
                    .col(CustomerEmailVerification::CreatedAt)
                    .name("idx_customer_email_verification_email_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(CustomerEmailVerification::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum CustomerEmailVerification {
    Table,
    Id,
    CustomerId,
    Email,
    Code,
    ExpiresAt,
    Verified,
    VerifiedAt,
    ConsumedAt,
    CreatedAt,
    UpdatedAt,
}
