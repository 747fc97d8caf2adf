// src/policy/identity.rs

//! Modelo de identidade: papéis do usuário e o "papel efetivo" derivado deles.
//!
//! O papel efetivo serve apenas para a interface (telas, login por plataforma).
//! Qualquer checagem de autorização com escopo de fornecedor deve usar
//! `role_for(supplier_id)` ou os predicados com `Some(supplier_id)`.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use crate::common::error::AppError;
use crate::models::auth::{GlobalRole, Platform, SupplierRole, SupplierRoleInfo, User, UserOut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectiveRole {
    PlatformAdmin,
    SupplierOwner,
    SupplierManager,
    SupplierSales,
    Consumer,
    User,
}

impl EffectiveRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveRole::PlatformAdmin => "PLATFORM_ADMIN",
            EffectiveRole::SupplierOwner => "SUPPLIER_OWNER",
            EffectiveRole::SupplierManager => "SUPPLIER_MANAGER",
            EffectiveRole::SupplierSales => "SUPPLIER_SALES",
            EffectiveRole::Consumer => "CONSUMER",
            EffectiveRole::User => "USER",
        }
    }
}

impl fmt::Display for EffectiveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SupplierMembership {
    pub supplier_id: i64,
    pub role: SupplierRole,
}

/// Usuário autenticado com todos os papéis resolvidos.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub global_role: Option<GlobalRole>,
    pub supplier_roles: HashSet<SupplierMembership>,
    pub consumer_id: Option<i64>,
}

/// Capacidade de consumidor: a única forma de criar pedidos, vínculos e reclamações.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerActor {
    pub user_id: i64,
    pub consumer_id: i64,
}

/// Capacidade de equipe de um fornecedor específico.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffActor {
    pub user_id: i64,
    pub supplier_id: i64,
    pub role: SupplierRole,
    // Perfil de consumidor do mesmo usuário, se houver (identidade dupla)
    pub own_consumer_id: Option<i64>,
}

impl StaffActor {
    /// A equipe nunca age sobre entidades cujo lado consumidor é ela mesma.
    pub fn ensure_not_own_consumer(&self, consumer_id: i64) -> Result<(), AppError> {
        if self.own_consumer_id == Some(consumer_id) {
            return Err(AppError::forbidden(
                "Supplier staff cannot act on their own consumer records",
            ));
        }
        Ok(())
    }
}

impl Identity {
    pub fn new(
        user: &User,
        memberships: impl IntoIterator<Item = SupplierMembership>,
        consumer_id: Option<i64>,
    ) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            is_active: user.is_active,
            global_role: user.global_role,
            supplier_roles: memberships.into_iter().collect(),
            consumer_id,
        }
    }

    // Prioridade: admin > dono > gerente > vendas > consumidor > usuário
    pub fn effective_role(&self) -> EffectiveRole {
        if self.is_platform_admin() {
            return EffectiveRole::PlatformAdmin;
        }
        if self.has_any_role(SupplierRole::Owner) {
            return EffectiveRole::SupplierOwner;
        }
        if self.has_any_role(SupplierRole::Manager) {
            return EffectiveRole::SupplierManager;
        }
        if self.has_any_role(SupplierRole::Sales) {
            return EffectiveRole::SupplierSales;
        }
        if self.consumer_id.is_some() {
            return EffectiveRole::Consumer;
        }
        EffectiveRole::User
    }

    fn has_any_role(&self, role: SupplierRole) -> bool {
        self.supplier_roles.iter().any(|m| m.role == role)
    }

    fn has_role(&self, supplier_id: Option<i64>, role: SupplierRole) -> bool {
        match supplier_id {
            Some(id) => self.role_for(id) == Some(role),
            None => self.has_any_role(role),
        }
    }

    /// Cargo do usuário em um fornecedor específico.
    pub fn role_for(&self, supplier_id: i64) -> Option<SupplierRole> {
        self.supplier_roles
            .iter()
            .find(|m| m.supplier_id == supplier_id)
            .map(|m| m.role)
    }

    pub fn is_platform_admin(&self) -> bool {
        self.global_role == Some(GlobalRole::PlatformAdmin)
    }

    pub fn is_consumer(&self) -> bool {
        self.consumer_id.is_some()
    }

    pub fn is_owner(&self, supplier_id: Option<i64>) -> bool {
        self.has_role(supplier_id, SupplierRole::Owner)
    }

    pub fn is_manager(&self, supplier_id: Option<i64>) -> bool {
        self.has_role(supplier_id, SupplierRole::Manager)
    }

    pub fn is_sales(&self, supplier_id: Option<i64>) -> bool {
        self.has_role(supplier_id, SupplierRole::Sales)
    }

    pub fn is_supplier_staff(&self, supplier_id: Option<i64>) -> bool {
        match supplier_id {
            Some(id) => self.role_for(id).is_some(),
            None => !self.supplier_roles.is_empty(),
        }
    }

    pub fn is_owner_or_manager(&self, supplier_id: i64) -> bool {
        self.role_for(supplier_id)
            .is_some_and(|role| role.is_owner_or_manager())
    }

    pub fn staff_supplier_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.supplier_roles.iter().map(|m| m.supplier_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn as_consumer(&self) -> Result<ConsumerActor, AppError> {
        self.consumer_id
            .map(|consumer_id| ConsumerActor {
                user_id: self.user_id,
                consumer_id,
            })
            .ok_or_else(|| AppError::forbidden("User is not associated with a consumer"))
    }

    pub fn as_staff_of(&self, supplier_id: i64) -> Result<StaffActor, AppError> {
        self.role_for(supplier_id)
            .map(|role| StaffActor {
                user_id: self.user_id,
                supplier_id,
                role,
                own_consumer_id: self.consumer_id,
            })
            .ok_or_else(|| AppError::forbidden("User is not associated with this supplier"))
    }

    /// Mobile: consumidores e vendas. Web: donos e gerentes. Admin entra em qualquer uma.
    pub fn allows_login_on(&self, platform: Option<Platform>) -> bool {
        if self.is_platform_admin() {
            return true;
        }
        match platform {
            Some(Platform::Mobile) => !self
                .supplier_roles
                .iter()
                .any(|m| m.role.is_owner_or_manager()),
            Some(Platform::Web) => !self.has_any_role(SupplierRole::Sales),
            None => true,
        }
    }

    pub fn to_user_out(&self) -> UserOut {
        let mut supplier_roles: Vec<SupplierRoleInfo> = self
            .supplier_roles
            .iter()
            .map(|m| SupplierRoleInfo {
                supplier_id: m.supplier_id,
                role: m.role,
            })
            .collect();
        supplier_roles.sort_by_key(|r| (r.supplier_id, r.role));

        UserOut {
            id: self.user_id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            is_active: self.is_active,
            global_role: self.global_role,
            supplier_roles,
            consumer_id: self.consumer_id,
            main_role: self.effective_role().to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn identity(
        global_role: Option<GlobalRole>,
        roles: &[(i64, SupplierRole)],
        consumer_id: Option<i64>,
    ) -> Identity {
        Identity {
            user_id: 1,
            email: "user@example.com".into(),
            full_name: "Test User".into(),
            is_active: true,
            global_role,
            supplier_roles: roles
                .iter()
                .map(|&(supplier_id, role)| SupplierMembership { supplier_id, role })
                .collect(),
            consumer_id,
        }
    }

    #[test]
    fn effective_role_follows_priority_order() {
        let admin = identity(
            Some(GlobalRole::PlatformAdmin),
            &[(1, SupplierRole::Owner)],
            Some(9),
        );
        assert_eq!(admin.effective_role(), EffectiveRole::PlatformAdmin);

        let owner_and_sales = identity(None, &[(1, SupplierRole::Sales), (2, SupplierRole::Owner)], None);
        assert_eq!(owner_and_sales.effective_role(), EffectiveRole::SupplierOwner);

        let manager = identity(None, &[(1, SupplierRole::Manager), (2, SupplierRole::Sales)], None);
        assert_eq!(manager.effective_role(), EffectiveRole::SupplierManager);

        assert_eq!(identity(None, &[], Some(4)).effective_role(), EffectiveRole::Consumer);
        assert_eq!(identity(None, &[], None).effective_role(), EffectiveRole::User);
    }

    #[test]
    fn sales_staff_with_consumer_profile_is_sales() {
        let dual = identity(None, &[(3, SupplierRole::Sales)], Some(7));
        assert_eq!(dual.effective_role(), EffectiveRole::SupplierSales);
        assert!(dual.is_consumer());
    }

    #[test]
    fn predicates_are_scoped_to_the_given_supplier() {
        let user = identity(None, &[(1, SupplierRole::Owner), (2, SupplierRole::Sales)], None);

        assert!(user.is_owner(Some(1)));
        assert!(!user.is_owner(Some(2)));
        assert!(user.is_owner(None));

        assert!(user.is_sales(Some(2)));
        assert!(!user.is_sales(Some(1)));

        assert!(!user.is_manager(None));
        assert!(user.is_supplier_staff(Some(2)));
        assert!(!user.is_supplier_staff(Some(3)));

        assert!(user.is_owner_or_manager(1));
        assert!(!user.is_owner_or_manager(2));
    }

    #[test]
    fn capacities_require_the_matching_membership() {
        let user = identity(None, &[(1, SupplierRole::Manager)], Some(5));

        let staff = user.as_staff_of(1).unwrap();
        assert_eq!(staff.role, SupplierRole::Manager);
        assert!(matches!(user.as_staff_of(2), Err(AppError::Forbidden(_))));

        assert_eq!(user.as_consumer().unwrap().consumer_id, 5);
        let no_profile = identity(None, &[(1, SupplierRole::Owner)], None);
        assert!(matches!(no_profile.as_consumer(), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn staff_cannot_act_on_own_consumer_records() {
        let user = identity(None, &[(1, SupplierRole::Owner)], Some(5));
        let staff = user.as_staff_of(1).unwrap();

        assert!(staff.ensure_not_own_consumer(6).is_ok());
        assert!(matches!(
            staff.ensure_not_own_consumer(5),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn platform_gate_hides_wrong_audience() {
        let owner = identity(None, &[(1, SupplierRole::Owner)], None);
        assert!(!owner.allows_login_on(Some(Platform::Mobile)));
        assert!(owner.allows_login_on(Some(Platform::Web)));

        let sales = identity(None, &[(1, SupplierRole::Sales)], None);
        assert!(sales.allows_login_on(Some(Platform::Mobile)));
        assert!(!sales.allows_login_on(Some(Platform::Web)));

        let consumer = identity(None, &[], Some(3));
        assert!(consumer.allows_login_on(Some(Platform::Mobile)));
        assert!(consumer.allows_login_on(Some(Platform::Web)));

        let admin = identity(Some(GlobalRole::PlatformAdmin), &[(1, SupplierRole::Sales)], None);
        assert!(admin.allows_login_on(Some(Platform::Web)));
        assert!(admin.allows_login_on(Some(Platform::Mobile)));
    }

    #[test]
    fn user_out_carries_main_role() {
        let user = identity(None, &[(2, SupplierRole::Sales), (1, SupplierRole::Manager)], Some(3));
        let out = user.to_user_out();
        assert_eq!(out.main_role, "SUPPLIER_MANAGER");
        assert_eq!(out.supplier_roles.len(), 2);
        assert_eq!(out.supplier_roles[0].supplier_id, 1);
        assert_eq!(out.consumer_id, Some(3));
    }
}
