// src/services/link_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{LinkRepository, SupplierRepository},
    models::link::{LinkStatus, LinkView},
    policy::{
        link::{authorize_link_transition, can_view_link},
        Identity,
    },
};

#[derive(Clone)]
pub struct LinkService {
    link_repo: LinkRepository,
    supplier_repo: SupplierRepository,
    pool: PgPool,
}

impl LinkService {
    pub fn new(link_repo: LinkRepository, supplier_repo: SupplierRepository, pool: PgPool) -> Self {
        Self {
            link_repo,
            supplier_repo,
            pool,
        }
    }

    pub async fn list_my_links(&self, identity: &Identity) -> Result<Vec<LinkView>, AppError> {
        self.link_repo
            .list_visible(identity.consumer_id, &identity.staff_supplier_ids())
            .await
    }

    /// Pedido de vínculo feito pelo consumidor.
    pub async fn request_link(&self, identity: &Identity, supplier_id: i64) -> Result<LinkView, AppError> {
        let consumer = identity.as_consumer()?;

        let supplier = self
            .supplier_repo
            .find_by_id(&self.pool, supplier_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or_else(|| AppError::not_found("Supplier"))?;

        // Checagem amigável; o índice parcial cobre a corrida
        if self
            .link_repo
            .find_active_for_pair(supplier.id, consumer.consumer_id)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateLink);
        }

        let link = self
            .link_repo
            .create_link(supplier.id, consumer.consumer_id, consumer.user_id)
            .await?;

        tracing::info!(
            link_id = link.id,
            supplier_id = link.supplier_id,
            consumer_id = link.consumer_id,
            actor_id = consumer.user_id,
            "🔗 Link requested"
        );

        self.view(link.id).await
    }

    pub async fn update_status(
        &self,
        identity: &Identity,
        link_id: i64,
        to: LinkStatus,
    ) -> Result<LinkView, AppError> {
        let link = self
            .link_repo
            .find_by_id(link_id)
            .await?
            .filter(|link| can_view_link(identity, link))
            .ok_or_else(|| AppError::not_found("Link"))?;

        authorize_link_transition(identity, &link, to)?;

        let updated = match self.link_repo.update_status(link.id, link.status, to).await? {
            Some(updated) => updated,
            None => {
                tracing::warn!(link_id, expected = %link.status, "Link changed concurrently");
                return Err(AppError::StaleState);
            }
        };

        tracing::info!(
            link_id,
            from = %link.status,
            to = %updated.status,
            actor_id = identity.user_id,
            "Link status changed"
        );

        self.view(updated.id).await
    }

    async fn view(&self, link_id: i64) -> Result<LinkView, AppError> {
        self.link_repo
            .find_view(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link"))
    }
}
