// src/db/complaint_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::complaint::{Complaint, ComplaintStatus, Incident, IncidentStatus},
};

const COMPLAINT_COLUMNS: &str = r#"
    id, order_id, consumer_id, supplier_id, created_by, handled_by, status,
    description, resolution, created_at, updated_at
"#;

const INCIDENT_COLUMNS: &str =
    "id, complaint_id, supplier_id, summary, description, status, created_by, created_at, updated_at";

// Reclamações e as ocorrências internas abertas junto com elas
#[derive(Clone)]
pub struct ComplaintRepository {
    pool: PgPool,
}

impl ComplaintRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Complaint>, AppError> {
        let complaint = sqlx::query_as::<_, Complaint>(&format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(complaint)
    }

    pub async fn list_visible(
        &self,
        consumer_id: Option<i64>,
        supplier_ids: &[i64],
    ) -> Result<Vec<Complaint>, AppError> {
        let complaints = sqlx::query_as::<_, Complaint>(&format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints WHERE consumer_id = $1 OR supplier_id = ANY($2) ORDER BY created_at DESC"
        ))
        .bind(consumer_id)
        .bind(supplier_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(complaints)
    }

    pub async fn create_complaint<'e, E>(
        &self,
        executor: E,
        order_id: i64,
        consumer_id: i64,
        supplier_id: i64,
        created_by: i64,
        description: &str,
    ) -> Result<Complaint, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let complaint = sqlx::query_as::<_, Complaint>(&format!(
            r#"
            INSERT INTO complaints (order_id, consumer_id, supplier_id, created_by, status, description)
            VALUES ($1, $2, $3, $4, 'open', $5)
            RETURNING {COMPLAINT_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(consumer_id)
        .bind(supplier_id)
        .bind(created_by)
        .bind(description)
        .fetch_one(executor)
        .await?;
        Ok(complaint)
    }

    /// CAS sobre o status. A resolução só é sobrescrita quando informada.
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: i64,
        from: ComplaintStatus,
        to: ComplaintStatus,
        handled_by: i64,
        resolution: Option<&str>,
    ) -> Result<Option<Complaint>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let complaint = sqlx::query_as::<_, Complaint>(&format!(
            r#"
            UPDATE complaints
            SET status = $3, handled_by = $4, resolution = COALESCE($5, resolution), updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {COMPLAINT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(handled_by)
        .bind(resolution)
        .fetch_optional(executor)
        .await?;
        Ok(complaint)
    }

    // --- OCORRÊNCIAS ---

    pub async fn create_incident<'e, E>(
        &self,
        executor: E,
        complaint: &Complaint,
        summary: &str,
        description: &str,
    ) -> Result<Incident, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let incident = sqlx::query_as::<_, Incident>(&format!(
            r#"
            INSERT INTO incidents (complaint_id, supplier_id, summary, description, status, created_by)
            VALUES ($1, $2, $3, $4, 'open', $5)
            RETURNING {INCIDENT_COLUMNS}
            "#
        ))
        .bind(complaint.id)
        .bind(complaint.supplier_id)
        .bind(summary)
        .bind(description)
        .bind(complaint.created_by)
        .fetch_one(executor)
        .await?;
        Ok(incident)
    }

    // Acompanha o status da reclamação
    pub async fn sync_incident_for_complaint<'e, E>(
        &self,
        executor: E,
        complaint_id: i64,
        status: IncidentStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE incidents SET status = $2, updated_at = NOW() WHERE complaint_id = $1")
            .bind(complaint_id)
            .bind(status)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn find_incident(&self, id: i64) -> Result<Option<Incident>, AppError> {
        let incident = sqlx::query_as::<_, Incident>(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(incident)
    }

    pub async fn list_all_incidents(&self) -> Result<Vec<Incident>, AppError> {
        let incidents = sqlx::query_as::<_, Incident>(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(incidents)
    }

    pub async fn list_incidents_for_suppliers(&self, supplier_ids: &[i64]) -> Result<Vec<Incident>, AppError> {
        let incidents = sqlx::query_as::<_, Incident>(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents WHERE supplier_id = ANY($1) ORDER BY created_at DESC"
        ))
        .bind(supplier_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(incidents)
    }

    pub async fn update_incident_status(
        &self,
        id: i64,
        from: IncidentStatus,
        to: IncidentStatus,
    ) -> Result<Option<Incident>, AppError> {
        let incident = sqlx::query_as::<_, Incident>(&format!(
            r#"
            UPDATE incidents SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {INCIDENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await?;
        Ok(incident)
    }
}
