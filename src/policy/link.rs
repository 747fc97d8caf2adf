// src/policy/link.rs

use crate::common::error::AppError;
use crate::models::link::{Link, LinkStatus};
use crate::policy::identity::Identity;

/// Quem pode executar cada aresta da máquina de estados do vínculo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEdgeActor {
    /// OWNER ou MANAGER do fornecedor do vínculo
    SupplierManagement,
    /// O consumidor dono do vínculo
    OwningConsumer,
}

pub fn link_edge(from: LinkStatus, to: LinkStatus) -> Option<LinkEdgeActor> {
    use LinkStatus::*;
    match (from, to) {
        (Pending, Accepted) | (Pending, Blocked) | (Accepted, Blocked) => {
            Some(LinkEdgeActor::SupplierManagement)
        }
        (Accepted, Removed) => Some(LinkEdgeActor::OwningConsumer),
        _ => None,
    }
}

/// Autoriza `link.status -> to` para o usuário.
///
/// Ordem das checagens: sem relação com o vínculo => `Forbidden`;
/// aresta inexistente => `InvalidTransition`; papel errado para a aresta => `Forbidden`.
pub fn authorize_link_transition(
    identity: &Identity,
    link: &Link,
    to: LinkStatus,
) -> Result<(), AppError> {
    let is_staff = identity.is_supplier_staff(Some(link.supplier_id));
    let is_owning_consumer = identity.consumer_id == Some(link.consumer_id);

    if !is_staff && !is_owning_consumer {
        return Err(AppError::forbidden("You are not part of this link"));
    }

    let edge = link_edge(link.status, to)
        .ok_or_else(|| AppError::invalid_transition(link.status, to))?;

    match edge {
        LinkEdgeActor::SupplierManagement => {
            let staff = identity.as_staff_of(link.supplier_id)?;
            if !staff.role.is_owner_or_manager() {
                return Err(AppError::forbidden(
                    "Only supplier owners or managers can change this link",
                ));
            }
            staff.ensure_not_own_consumer(link.consumer_id)
        }
        LinkEdgeActor::OwningConsumer => {
            if !is_owning_consumer {
                return Err(AppError::forbidden("Only the consumer can remove this link"));
            }
            Ok(())
        }
    }
}

/// Vínculo visível para o usuário (consumidor dono ou equipe do fornecedor).
pub fn can_view_link(identity: &Identity, link: &Link) -> bool {
    identity.is_platform_admin()
        || identity.consumer_id == Some(link.consumer_id)
        || identity.is_supplier_staff(Some(link.supplier_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::SupplierRole;
    use crate::policy::identity::tests::identity;
    use chrono::Utc;

    fn link(status: LinkStatus) -> Link {
        Link {
            id: 1,
            supplier_id: 10,
            consumer_id: 20,
            status,
            requested_by: 99,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn edges_follow_the_state_machine() {
        use LinkStatus::*;
        assert_eq!(link_edge(Pending, Accepted), Some(LinkEdgeActor::SupplierManagement));
        assert_eq!(link_edge(Pending, Blocked), Some(LinkEdgeActor::SupplierManagement));
        assert_eq!(link_edge(Accepted, Blocked), Some(LinkEdgeActor::SupplierManagement));
        assert_eq!(link_edge(Accepted, Removed), Some(LinkEdgeActor::OwningConsumer));

        assert_eq!(link_edge(Pending, Removed), None);
        assert_eq!(link_edge(Blocked, Accepted), None);
        assert_eq!(link_edge(Removed, Pending), None);
        assert_eq!(link_edge(Accepted, Accepted), None);
    }

    #[test]
    fn manager_accepts_pending_link() {
        let manager = identity(None, &[(10, SupplierRole::Manager)], None);
        assert!(authorize_link_transition(&manager, &link(LinkStatus::Pending), LinkStatus::Accepted).is_ok());
    }

    #[test]
    fn sales_cannot_accept_or_block() {
        let sales = identity(None, &[(10, SupplierRole::Sales)], None);
        let res = authorize_link_transition(&sales, &link(LinkStatus::Pending), LinkStatus::Accepted);
        assert!(matches!(res, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn owner_of_another_supplier_is_forbidden() {
        let other_owner = identity(None, &[(11, SupplierRole::Owner)], None);
        let res = authorize_link_transition(&other_owner, &link(LinkStatus::Pending), LinkStatus::Accepted);
        assert!(matches!(res, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn consumer_removes_only_accepted_links() {
        let consumer = identity(None, &[], Some(20));
        assert!(authorize_link_transition(&consumer, &link(LinkStatus::Accepted), LinkStatus::Removed).is_ok());

        let pending = authorize_link_transition(&consumer, &link(LinkStatus::Pending), LinkStatus::Removed);
        assert!(matches!(pending, Err(AppError::InvalidTransition { .. })));

        let block = authorize_link_transition(&consumer, &link(LinkStatus::Accepted), LinkStatus::Blocked);
        assert!(matches!(block, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn staff_cannot_remove_on_behalf_of_consumer() {
        let owner = identity(None, &[(10, SupplierRole::Owner)], None);
        let res = authorize_link_transition(&owner, &link(LinkStatus::Accepted), LinkStatus::Removed);
        assert!(matches!(res, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn terminal_states_reject_every_move() {
        let owner = identity(None, &[(10, SupplierRole::Owner)], None);
        for to in [LinkStatus::Pending, LinkStatus::Accepted, LinkStatus::Removed] {
            let res = authorize_link_transition(&owner, &link(LinkStatus::Blocked), to);
            assert!(matches!(res, Err(AppError::InvalidTransition { .. })));
        }
    }

    #[test]
    fn dual_identity_owner_cannot_accept_own_request() {
        // Dono do fornecedor 10 que também é o consumidor 20
        let dual = identity(None, &[(10, SupplierRole::Owner)], Some(20));
        let res = authorize_link_transition(&dual, &link(LinkStatus::Pending), LinkStatus::Accepted);
        assert!(matches!(res, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn strangers_cannot_see_links() {
        let stranger = identity(None, &[], Some(21));
        assert!(!can_view_link(&stranger, &link(LinkStatus::Pending)));
        let sales = identity(None, &[(10, SupplierRole::Sales)], None);
        assert!(can_view_link(&sales, &link(LinkStatus::Pending)));
    }
}
