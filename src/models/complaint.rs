// src/models/complaint.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "complaint_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
    Escalated,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "open",
            ComplaintStatus::InProgress => "in_progress",
            ComplaintStatus::Resolved => "resolved",
            ComplaintStatus::Escalated => "escalated",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "incident_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Open,
    InProgress,
    Resolved,
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidentStatus::Open => f.write_str("open"),
            IncidentStatus::InProgress => f.write_str("in_progress"),
            IncidentStatus::Resolved => f.write_str("resolved"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: i64,
    pub order_id: i64,
    pub consumer_id: i64,
    pub supplier_id: i64,
    pub created_by: i64,
    pub handled_by: Option<i64>,
    pub status: ComplaintStatus,
    pub description: String,
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Ocorrência interna do fornecedor, aberta junto com a reclamação
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: i64,
    pub complaint_id: Option<i64>,
    pub supplier_id: i64,
    #[schema(example = "Complaint #10 - Order #42")]
    pub summary: String,
    pub description: String,
    pub status: IncidentStatus,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintPayload {
    #[schema(example = 42)]
    pub order_id: i64,
    #[validate(length(min = 1, message = "The description is required."))]
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateComplaintStatusPayload {
    #[schema(example = "in_progress")]
    pub status: ComplaintStatus,
    pub resolution: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateIncidentStatusPayload {
    pub status: IncidentStatus,
}
