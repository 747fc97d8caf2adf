// src/services/product_service.rs

use crate::{
    common::error::AppError,
    db::{LinkRepository, ProductRepository},
    models::product::{Product, ProductPayload},
    policy::Identity,
};

#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    link_repo: LinkRepository,
}

impl ProductService {
    pub fn new(product_repo: ProductRepository, link_repo: LinkRepository) -> Self {
        Self {
            product_repo,
            link_repo,
        }
    }

    /// Catálogo ativo. Consumidor só enxerga com vínculo aceito no momento da consulta.
    pub async fn list_for_supplier(
        &self,
        identity: &Identity,
        supplier_id: Option<i64>,
    ) -> Result<Vec<Product>, AppError> {
        let supplier_id = supplier_id
            .ok_or_else(|| AppError::InvalidInput("The supplier_id parameter is required.".into()))?;

        let allowed = identity.is_platform_admin()
            || identity.is_supplier_staff(Some(supplier_id))
            || match identity.consumer_id {
                Some(consumer_id) => self.link_repo.is_accepted(supplier_id, consumer_id).await?,
                None => false,
            };

        if !allowed {
            return Err(AppError::forbidden(
                "You must have an accepted link with this supplier to view products",
            ));
        }

        self.product_repo.list_active_for_supplier(supplier_id).await
    }

    fn ensure_catalog_manager(identity: &Identity, supplier_id: i64) -> Result<(), AppError> {
        if identity.is_owner_or_manager(supplier_id) {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Only supplier owners or managers can manage products",
            ))
        }
    }

    pub async fn create_product(
        &self,
        identity: &Identity,
        supplier_id: i64,
        payload: &ProductPayload,
    ) -> Result<Product, AppError> {
        Self::ensure_catalog_manager(identity, supplier_id)?;
        let product = self.product_repo.create_product(supplier_id, payload).await?;
        tracing::info!(product_id = product.id, supplier_id, actor_id = identity.user_id, "Product created");
        Ok(product)
    }

    pub async fn update_product(
        &self,
        identity: &Identity,
        supplier_id: i64,
        product_id: i64,
        payload: &ProductPayload,
    ) -> Result<Product, AppError> {
        Self::ensure_catalog_manager(identity, supplier_id)?;
        let product = self
            .product_repo
            .update_product(supplier_id, product_id, payload)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))?;
        tracing::info!(product_id, supplier_id, actor_id = identity.user_id, "Product updated");
        Ok(product)
    }

    pub async fn delete_product(&self, identity: &Identity, supplier_id: i64, product_id: i64) -> Result<(), AppError> {
        Self::ensure_catalog_manager(identity, supplier_id)?;
        if !self.product_repo.deactivate(supplier_id, product_id).await? {
            return Err(AppError::not_found("Product"));
        }
        tracing::info!(product_id, supplier_id, actor_id = identity.user_id, "Product deactivated");
        Ok(())
    }
}
