use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use storefront_auth_schema::{email_verifications, password_reset_tokens};
use storefront_domain::id::CustomerId;

use crate::domain::repository::{EmailVerificationRepository, PasswordResetTokenRepository};
use crate::domain::types::{EmailVerification, PasswordResetToken};
use crate::error::AuthServiceError;

// ── EmailVerification repository ──────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEmailVerificationRepository {
    pub db: DatabaseConnection,
}

impl EmailVerificationRepository for DbEmailVerificationRepository {
    async fn create(&self, record: &EmailVerification) -> Result<(), AuthServiceError> {
        email_verifications::ActiveModel {
            id: Set(record.id),
            customer_id: Set(record.customer_id.as_ref().map(|c| c.0.clone())),
            email: Set(record.email.clone()),
            code: Set(record.code.clone()),
            expires_at: Set(record.expires_at),
            verified: Set(record.verified),
            verified_at: Set(record.verified_at),
            consumed_at: Set(record.consumed_at),
            created_at: Set(record.created_at),
            updated_at: Set(record.created_at),
        }
        .insert(&self.db)
        .await
        .context("insert email verification")?;
        Ok(())
    }

    async fn find_latest_pending(
        &self,
        email: &str,
    ) -> Result<Option<EmailVerification>, AuthServiceError> {
        let model = email_verifications::Entity::find()
            .filter(email_verifications::Column::Email.eq(email))
            .filter(email_verifications::Column::Verified.eq(false))
            .order_by_desc(email_verifications::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find latest pending email verification")?;
        Ok(model.map(verification_from_model))
    }

    async fn mark_verified(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, AuthServiceError> {
        let result = email_verifications::Entity::update_many()
            .col_expr(email_verifications::Column::Verified, Expr::value(true))
            .col_expr(email_verifications::Column::VerifiedAt, Expr::value(now))
            .col_expr(email_verifications::Column::ConsumedAt, Expr::value(now))
            .col_expr(email_verifications::Column::UpdatedAt, Expr::value(now))
            .filter(email_verifications::Column::Id.eq(id))
            .filter(email_verifications::Column::Verified.eq(false))
            .exec(&self.db)
            .await
            .context("mark email verification verified")?;
        Ok(result.rows_affected == 1)
    }

    async fn has_verified(&self, email: &str) -> Result<bool, AuthServiceError> {
        let count = email_verifications::Entity::find()
            .filter(email_verifications::Column::Email.eq(email))
            .filter(email_verifications::Column::Verified.eq(true))
            .count(&self.db)
            .await
            .context("count verified email verifications")?;
        Ok(count > 0)
    }
}

fn verification_from_model(model: email_verifications::Model) -> EmailVerification {
    EmailVerification {
        id: model.id,
        customer_id: model.customer_id.map(CustomerId),
        email: model.email,
        code: model.code,
        expires_at: model.expires_at,
        verified: model.verified,
        verified_at: model.verified_at,
        consumed_at: model.consumed_at,
        created_at: model.created_at,
    }
}

// ── PasswordResetToken repository ─────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPasswordResetTokenRepository {
    pub db: DatabaseConnection,
}

impl PasswordResetTokenRepository for DbPasswordResetTokenRepository {
    async fn replace_active(
        &self,
        token: &PasswordResetToken,
        now: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let token = token.clone();
                Box::pin(async move {
                    invalidate_unused(txn, &token.email, now).await?;
                    insert_reset_token(txn, &token).await?;
                    Ok(())
                })
            })
            .await
            .context("replace active password reset token")?;
        Ok(())
    }

    async fn find_latest_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<PasswordResetToken>, AuthServiceError> {
        let model = password_reset_tokens::Entity::find()
            .filter(password_reset_tokens::Column::TokenHash.eq(token_hash))
            .order_by_desc(password_reset_tokens::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find password reset token by hash")?;
        Ok(model.map(reset_token_from_model))
    }

    async fn mark_used(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, AuthServiceError> {
        let result = password_reset_tokens::Entity::update_many()
            .col_expr(password_reset_tokens::Column::UsedAt, Expr::value(now))
            .col_expr(password_reset_tokens::Column::UpdatedAt, Expr::value(now))
            .filter(password_reset_tokens::Column::Id.eq(id))
            .filter(password_reset_tokens::Column::UsedAt.is_null())
            .exec(&self.db)
            .await
            .context("mark password reset token used")?;
        Ok(result.rows_affected == 1)
    }
}

async fn invalidate_unused(
    txn: &DatabaseTransaction,
    email: &str,
    now: DateTime<Utc>,
) -> Result<(), sea_orm::DbErr> {
    password_reset_tokens::Entity::update_many()
        .col_expr(password_reset_tokens::Column::UsedAt, Expr::value(now))
        .col_expr(password_reset_tokens::Column::UpdatedAt, Expr::value(now))
        .filter(password_reset_tokens::Column::Email.eq(email))
        .filter(password_reset_tokens::Column::UsedAt.is_null())
        .exec(txn)
        .await?;
    Ok(())
}

async fn insert_reset_token(
    txn: &DatabaseTransaction,
    token: &PasswordResetToken,
) -> Result<(), sea_orm::DbErr> {
    password_reset_tokens::ActiveModel {
        id: Set(token.id),
        customer_id: Set(token.customer_id.as_ref().map(|c| c.0.clone())),
        email: Set(token.email.clone()),
        token_hash: Set(token.token_hash.clone()),
        expires_at: Set(token.expires_at),
        used_at: Set(token.used_at),
        created_at: Set(token.created_at),
        updated_at: Set(token.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn reset_token_from_model(model: password_reset_tokens::Model) -> PasswordResetToken {
    PasswordResetToken {
        id: model.id,
        customer_id: model.customer_id.map(CustomerId),
        email: model.email,
        token_hash: model.token_hash,
        expires_at: model.expires_at,
        used_at: model.used_at,
        created_at: model.created_at,
    }
}
