// src/policy/complaint.rs

use crate::common::error::AppError;
use crate::models::auth::SupplierRole;
use crate::models::complaint::{Complaint, ComplaintStatus, Incident, IncidentStatus};
use crate::models::order::Order;
use crate::policy::identity::{ConsumerActor, Identity, StaffActor};

const SALES_ONLY: &[SupplierRole] = &[SupplierRole::Sales];
const MANAGEMENT: &[SupplierRole] = &[SupplierRole::Manager, SupplierRole::Owner];

/// Papéis que podem executar cada aresta da reclamação.
pub fn complaint_edge_roles(from: ComplaintStatus, to: ComplaintStatus) -> Option<&'static [SupplierRole]> {
    use ComplaintStatus::*;
    match (from, to) {
        (Open, InProgress) | (InProgress, Resolved) | (InProgress, Escalated) => {
            Some(SALES_ONLY)
        }
        (Escalated, Resolved) => Some(MANAGEMENT),
        _ => None,
    }
}

/// Status da ocorrência que acompanha a reclamação.
pub fn incident_status_for(status: ComplaintStatus) -> Option<IncidentStatus> {
    match status {
        ComplaintStatus::Open => None,
        ComplaintStatus::InProgress | ComplaintStatus::Escalated => Some(IncidentStatus::InProgress),
        ComplaintStatus::Resolved => Some(IncidentStatus::Resolved),
    }
}

/// Só o consumidor que fez o pedido pode abrir reclamação sobre ele.
pub fn authorize_complaint_creation(identity: &Identity, order: &Order) -> Result<ConsumerActor, AppError> {
    let consumer = identity.as_consumer()?;
    if order.consumer_id != consumer.consumer_id {
        return Err(AppError::forbidden(
            "You can only create complaints for your own orders",
        ));
    }
    Ok(consumer)
}

/// Mesma ordem das outras máquinas: relação, aresta, papel.
pub fn authorize_complaint_transition(
    identity: &Identity,
    complaint: &Complaint,
    to: ComplaintStatus,
) -> Result<StaffActor, AppError> {
    let staff = identity.as_staff_of(complaint.supplier_id).map_err(|_| {
        AppError::forbidden("You must be supplier staff to update complaint status")
    })?;

    let roles = complaint_edge_roles(complaint.status, to)
        .ok_or_else(|| AppError::invalid_transition(complaint.status, to))?;

    if !roles.contains(&staff.role) {
        return Err(AppError::forbidden(format!(
            "{} staff cannot move a complaint from {} to {}",
            staff.role.as_str(),
            complaint.status,
            to
        )));
    }

    staff.ensure_not_own_consumer(complaint.consumer_id)?;
    Ok(staff)
}

/// Admin da plataforma, ou OWNER/MANAGER do fornecedor da ocorrência.
pub fn authorize_incident_update(identity: &Identity, incident: &Incident) -> Result<(), AppError> {
    if identity.is_platform_admin() || identity.is_owner_or_manager(incident.supplier_id) {
        return Ok(());
    }
    Err(AppError::forbidden(
        "Only supplier owners, managers or platform admins can update incidents",
    ))
}
