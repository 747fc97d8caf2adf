// src/services/supplier_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{ConsumerRepository, SupplierRepository, UserRepository},
    models::{
        auth::{StaffMember, SupplierRole},
        supplier::{AddStaffPayload, Consumer, CreateConsumerPayload, CreateSupplierPayload, Supplier},
    },
    policy::Identity,
};

#[derive(Clone)]
pub struct SupplierService {
    supplier_repo: SupplierRepository,
    consumer_repo: ConsumerRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl SupplierService {
    pub fn new(
        supplier_repo: SupplierRepository,
        consumer_repo: ConsumerRepository,
        user_repo: UserRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            supplier_repo,
            consumer_repo,
            user_repo,
            pool,
        }
    }

    pub async fn list_active(&self) -> Result<Vec<Supplier>, AppError> {
        self.supplier_repo.list_active().await
    }

    pub async fn list_my_suppliers(&self, identity: &Identity) -> Result<Vec<Supplier>, AppError> {
        self.supplier_repo.list_for_user(identity.user_id).await
    }

    // Cria o fornecedor e dá OWNER ao criador, na mesma transação
    pub async fn create_supplier(
        &self,
        identity: &Identity,
        payload: &CreateSupplierPayload,
    ) -> Result<Supplier, AppError> {
        // 1. Inicia Transação
        let mut tx = self.pool.begin().await?;

        // 2. Fornecedor
        let supplier = self.supplier_repo.create_supplier(&mut *tx, payload).await?;

        // 3. Criador vira OWNER
        self.supplier_repo
            .add_staff(&mut *tx, supplier.id, identity.user_id, SupplierRole::Owner)
            .await?;

        tx.commit().await?;

        tracing::info!(supplier_id = supplier.id, owner_id = identity.user_id, "✅ Supplier created");
        Ok(supplier)
    }

    pub async fn deactivate_supplier(&self, identity: &Identity, supplier_id: i64) -> Result<(), AppError> {
        if !identity.is_owner(Some(supplier_id)) {
            return Err(AppError::forbidden("Only the supplier owner can deactivate it"));
        }
        if !self.supplier_repo.deactivate(supplier_id).await? {
            return Err(AppError::not_found("Supplier"));
        }
        tracing::info!(supplier_id, actor_id = identity.user_id, "Supplier deactivated");
        Ok(())
    }

    // --- EQUIPE ---

    pub async fn add_staff(
        &self,
        identity: &Identity,
        supplier_id: i64,
        payload: &AddStaffPayload,
    ) -> Result<StaffMember, AppError> {
        if !identity.is_owner(Some(supplier_id)) {
            return Err(AppError::forbidden("Only the supplier owner can add staff"));
        }
        if payload.role == SupplierRole::Owner {
            return Err(AppError::InvalidInput(
                "Staff can only be granted MANAGER or SALES.".into(),
            ));
        }

        let user = self
            .user_repo
            .find_by_email(&payload.email)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        self.supplier_repo
            .add_staff(&self.pool, supplier_id, user.id, payload.role)
            .await?;

        tracing::info!(
            supplier_id,
            user_id = user.id,
            role = payload.role.as_str(),
            actor_id = identity.user_id,
            "Staff member added"
        );

        // Relê a lista para devolver a linha com e-mail e nome
        self.supplier_repo
            .list_staff(supplier_id)
            .await?
            .into_iter()
            .find(|member| member.user_id == user.id)
            .ok_or_else(|| AppError::not_found("Staff member"))
    }

    pub async fn list_staff(&self, identity: &Identity, supplier_id: i64) -> Result<Vec<StaffMember>, AppError> {
        if !identity.is_owner_or_manager(supplier_id) {
            return Err(AppError::forbidden(
                "Only supplier owners or managers can list staff",
            ));
        }
        self.supplier_repo.list_staff(supplier_id).await
    }

    pub async fn remove_staff(&self, identity: &Identity, supplier_id: i64, user_id: i64) -> Result<(), AppError> {
        if !identity.is_owner(Some(supplier_id)) {
            return Err(AppError::forbidden("Only the supplier owner can remove staff"));
        }
        if user_id == identity.user_id {
            return Err(AppError::InvalidInput("You cannot remove yourself.".into()));
        }

        match self.supplier_repo.find_staff_role(supplier_id, user_id).await? {
            None => return Err(AppError::not_found("Staff member")),
            Some(SupplierRole::Owner) => {
                return Err(AppError::forbidden("Another owner cannot be removed"));
            }
            Some(_) => {}
        }

        self.supplier_repo.remove_staff(supplier_id, user_id).await?;
        tracing::info!(supplier_id, user_id, actor_id = identity.user_id, "Staff member removed");
        Ok(())
    }

    // --- CONSUMIDORES ---

    pub async fn create_consumer(
        &self,
        identity: &Identity,
        payload: &CreateConsumerPayload,
    ) -> Result<Consumer, AppError> {
        if identity.consumer_id.is_some() {
            return Err(AppError::ConsumerProfileExists);
        }
        let consumer = self.consumer_repo.create_consumer(identity.user_id, payload).await?;
        tracing::info!(consumer_id = consumer.id, user_id = identity.user_id, "✅ Consumer profile created");
        Ok(consumer)
    }

    pub async fn get_my_consumer(&self, identity: &Identity) -> Result<Consumer, AppError> {
        self.consumer_repo
            .find_by_user(identity.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Consumer profile"))
    }
}
