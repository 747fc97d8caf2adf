// src/db/chat_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::chat::Message};

// O cargo do remetente é resolvido no momento da leitura:
// consumidor dono do par, ou o cargo dele no fornecedor.
const MESSAGE_SELECT: &str = r#"
    SELECT m.id, m.supplier_id, m.consumer_id, m.order_id, m.sender_id, m.content,
           m.created_at,
           u.full_name AS sender_name,
           CASE
               WHEN c.user_id = m.sender_id THEN 'CONSUMER'
               ELSE ss.role::TEXT
           END AS sender_role
    FROM messages m
    INNER JOIN users u ON u.id = m.sender_id
    INNER JOIN consumers c ON c.id = m.consumer_id
    LEFT JOIN supplier_staff ss ON ss.supplier_id = m.supplier_id AND ss.user_id = m.sender_id
"#;

#[derive(Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_message(
        &self,
        supplier_id: i64,
        consumer_id: i64,
        order_id: Option<i64>,
        sender_id: i64,
        content: &str,
    ) -> Result<Message, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO messages (supplier_id, consumer_id, order_id, sender_id, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(supplier_id)
        .bind(consumer_id)
        .bind(order_id)
        .bind(sender_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        let message = sqlx::query_as::<_, Message>(&format!("{MESSAGE_SELECT} WHERE m.id = $1"))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(message)
    }

    // Conversa em ordem cronológica
    pub async fn list_thread(&self, supplier_id: i64, consumer_id: i64) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            "{MESSAGE_SELECT} WHERE m.supplier_id = $1 AND m.consumer_id = $2 ORDER BY m.created_at, m.id"
        ))
        .bind(supplier_id)
        .bind(consumer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }
}
