// src/db/consumer_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::supplier::{Consumer, CreateConsumerPayload},
};

const CONSUMER_COLUMNS: &str = "id, user_id, organization_name, contact_email, contact_phone, address, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct ConsumerRepository {
    pool: PgPool,
}

impl ConsumerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: i64) -> Result<Option<Consumer>, AppError> {
        let consumer = sqlx::query_as::<_, Consumer>(&format!(
            "SELECT {CONSUMER_COLUMNS} FROM consumers WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(consumer)
    }

    pub async fn find_id_by_user(&self, user_id: i64) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM consumers WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    // Um perfil por usuário (constraint consumers_user_id_key)
    pub async fn create_consumer(
        &self,
        user_id: i64,
        payload: &CreateConsumerPayload,
    ) -> Result<Consumer, AppError> {
        sqlx::query_as::<_, Consumer>(&format!(
            r#"
            INSERT INTO consumers (user_id, organization_name, contact_email, contact_phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CONSUMER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&payload.organization_name)
        .bind(&payload.contact_email)
        .bind(&payload.contact_phone)
        .bind(&payload.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() && db_err.constraint() == Some("consumers_user_id_key") {
                    return AppError::ConsumerProfileExists;
                }
            }
            e.into()
        })
    }
}
