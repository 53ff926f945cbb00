use sea_orm::entity::prelude::*;

/// Password-reset token. Only the SHA-256 hex of the raw token is stored.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customer_password_reset_token")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Option<String>,
    pub email: String,
    pub token_hash: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    /// Set on successful reset, on first use after expiry, or when a newer
    /// token supersedes this one.
    pub used_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
