// src/models/chat.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: i64,
    pub supplier_id: i64,
    pub consumer_id: i64,
    pub order_id: Option<i64>,
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    // Resolvidos por join
    pub sender_name: Option<String>,
    pub sender_role: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub supplier_id: i64,
    pub consumer_id: i64,
    pub order_id: Option<i64>,
    pub sender_id: i64,
    pub sender_name: Option<String>,
    #[schema(example = "CONSUMER")]
    pub sender_role: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(msg: Message) -> Self {
        Self {
            id: msg.id,
            supplier_id: msg.supplier_id,
            consumer_id: msg.consumer_id,
            order_id: msg.order_id,
            sender_id: msg.sender_id,
            sender_name: msg.sender_name,
            sender_role: msg.sender_role,
            text: msg.content,
            created_at: msg.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessagePayload {
    pub supplier_id: i64,
    pub consumer_id: i64,
    #[validate(length(min = 1, message = "The message cannot be empty."))]
    pub text: String,
    pub order_id: Option<i64>,
}
