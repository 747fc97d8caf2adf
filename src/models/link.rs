// src/models/link.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "link_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Pending,
    Accepted,
    Blocked,
    Removed,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Pending => "pending",
            LinkStatus::Accepted => "accepted",
            LinkStatus::Blocked => "blocked",
            LinkStatus::Removed => "removed",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: i64,
    pub supplier_id: i64,
    pub consumer_id: i64,
    pub status: LinkStatus,
    pub requested_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Vínculo com os nomes das duas partes (para as telas)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub link: Link,
    pub supplier_name: String,
    pub consumer_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkPayload {
    #[schema(example = 3)]
    pub supplier_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLinkStatusPayload {
    #[schema(example = "accepted")]
    pub status: LinkStatus,
}
