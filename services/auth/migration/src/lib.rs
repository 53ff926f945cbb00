pub use sea_orm_migration::prelude::*;

mod m20250817_000001_create_customer_email_verification;
mod m20250829_000002_create_customer_password_reset_token;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250817_000001_create_customer_email_verification::Migration),
            Box::new(m20250829_000002_create_customer_password_reset_token::Migration),
        ]
    }
}
