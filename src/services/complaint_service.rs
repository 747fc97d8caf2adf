// src/services/complaint_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{ComplaintRepository, OrderRepository},
    models::complaint::{Complaint, ComplaintStatus, Incident, IncidentStatus},
    policy::{
        complaint::{
            authorize_complaint_creation, authorize_complaint_transition, authorize_incident_update,
            incident_status_for,
        },
        Identity,
    },
};

#[derive(Clone)]
pub struct ComplaintService {
    complaint_repo: ComplaintRepository,
    order_repo: OrderRepository,
    pool: PgPool,
}

impl ComplaintService {
    pub fn new(complaint_repo: ComplaintRepository, order_repo: OrderRepository, pool: PgPool) -> Self {
        Self {
            complaint_repo,
            order_repo,
            pool,
        }
    }

    /// Abre a reclamação e a ocorrência do fornecedor na mesma transação.
    pub async fn create_complaint(
        &self,
        identity: &Identity,
        order_id: i64,
        description: &str,
    ) -> Result<Complaint, AppError> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order"))?;

        let consumer = authorize_complaint_creation(identity, &order)?;

        // 1. Inicia Transação
        let mut tx = self.pool.begin().await?;

        // 2. Reclamação
        let complaint = self
            .complaint_repo
            .create_complaint(
                &mut *tx,
                order.id,
                consumer.consumer_id,
                order.supplier_id,
                consumer.user_id,
                description,
            )
            .await?;

        // 3. Ocorrência interna
        let summary = format!("Complaint #{} - Order #{}", complaint.id, order.id);
        let incident_description = format!("Complaint created for order {}: {}", order.id, description);
        let incident = self
            .complaint_repo
            .create_incident(&mut *tx, &complaint, &summary, &incident_description)
            .await?;

        tx.commit().await?;

        tracing::info!(
            complaint_id = complaint.id,
            incident_id = incident.id,
            order_id = order.id,
            actor_id = consumer.user_id,
            "Complaint opened"
        );

        Ok(complaint)
    }

    pub async fn update_status(
        &self,
        identity: &Identity,
        complaint_id: i64,
        to: ComplaintStatus,
        resolution: Option<&str>,
    ) -> Result<Complaint, AppError> {
        let complaint = self
            .complaint_repo
            .find_by_id(complaint_id)
            .await?
            .ok_or_else(|| AppError::not_found("Complaint"))?;

        let staff = authorize_complaint_transition(identity, &complaint, to)?;
        let resolution = resolution.map(str::trim).filter(|r| !r.is_empty());

        let mut tx = self.pool.begin().await?;

        let updated = match self
            .complaint_repo
            .update_status(&mut *tx, complaint.id, complaint.status, to, staff.user_id, resolution)
            .await?
        {
            Some(updated) => updated,
            None => {
                tracing::warn!(complaint_id, expected = %complaint.status, "Complaint changed concurrently");
                return Err(AppError::StaleState);
            }
        };

        if let Some(incident_status) = incident_status_for(to) {
            self.complaint_repo
                .sync_incident_for_complaint(&mut *tx, complaint.id, incident_status)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            complaint_id,
            from = %complaint.status,
            to = %updated.status,
            actor_id = staff.user_id,
            "Complaint status changed"
        );

        Ok(updated)
    }

    pub async fn escalate(&self, identity: &Identity, complaint_id: i64) -> Result<Complaint, AppError> {
        self.update_status(identity, complaint_id, ComplaintStatus::Escalated, None)
            .await
    }

    pub async fn list_my_complaints(&self, identity: &Identity) -> Result<Vec<Complaint>, AppError> {
        self.complaint_repo
            .list_visible(identity.consumer_id, &identity.staff_supplier_ids())
            .await
    }

    // --- OCORRÊNCIAS ---

    pub async fn list_my_incidents(&self, identity: &Identity) -> Result<Vec<Incident>, AppError> {
        if identity.is_platform_admin() {
            return self.complaint_repo.list_all_incidents().await;
        }

        let supplier_ids = identity.staff_supplier_ids();
        if supplier_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.complaint_repo.list_incidents_for_suppliers(&supplier_ids).await
    }

    pub async fn update_incident_status(
        &self,
        identity: &Identity,
        incident_id: i64,
        to: IncidentStatus,
    ) -> Result<Incident, AppError> {
        let incident = self
            .complaint_repo
            .find_incident(incident_id)
            .await?
            .ok_or_else(|| AppError::not_found("Incident"))?;

        authorize_incident_update(identity, &incident)?;

        let updated = match self
            .complaint_repo
            .update_incident_status(incident.id, incident.status, to)
            .await?
        {
            Some(updated) => updated,
            None => {
                tracing::warn!(incident_id, expected = %incident.status, "Incident changed concurrently");
                return Err(AppError::StaleState);
            }
        };

        tracing::info!(
            incident_id,
            from = %incident.status,
            to = %updated.status,
            actor_id = identity.user_id,
            "Incident status changed"
        );

        Ok(updated)
    }
}
