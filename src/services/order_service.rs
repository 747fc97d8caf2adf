// src/services/order_service.rs

use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{LinkRepository, OrderRepository, ProductRepository},
    models::{
        order::{CreateOrderPayload, Order, OrderItem, OrderResponse, OrderStatus},
        product::{DeliveryMethod, Product},
    },
    policy::{
        order::{
            authorize_consumer_cancel, authorize_order_status_change, authorize_reorder,
            can_view_order, ensure_distinct_products, price_order, restores_stock, OrderLine,
        },
        ConsumerActor, Identity,
    },
};

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    product_repo: ProductRepository,
    link_repo: LinkRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(
        order_repo: OrderRepository,
        product_repo: ProductRepository,
        link_repo: LinkRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            order_repo,
            product_repo,
            link_repo,
            pool,
        }
    }

    pub async fn create_order(
        &self,
        identity: &Identity,
        payload: &CreateOrderPayload,
    ) -> Result<OrderResponse, AppError> {
        let consumer = identity.as_consumer()?;
        let lines: Vec<OrderLine> = payload
            .items
            .iter()
            .map(|item| OrderLine {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect();

        self.place_order(consumer, payload.supplier_id, &lines, payload.delivery_method)
            .await
    }

    /// Novo pedido a partir de um anterior, revalidado contra o estoque atual.
    pub async fn reorder(&self, identity: &Identity, order_id: i64) -> Result<OrderResponse, AppError> {
        let original = self.find_order(order_id).await?;
        let consumer = authorize_reorder(identity, &original)?;

        let lines: Vec<OrderLine> = self
            .order_repo
            .items_for_orders(&self.pool, &[original.id])
            .await?
            .into_iter()
            .map(|item| OrderLine {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect();

        let response = self
            .place_order(consumer, original.supplier_id, &lines, original.delivery_method)
            .await?;

        tracing::info!(original_id = original.id, order_id = response.order.id, "Order reordered");
        Ok(response)
    }

    // Validação, baixa de estoque e gravação numa única transação.
    async fn place_order(
        &self,
        consumer: ConsumerActor,
        supplier_id: i64,
        lines: &[OrderLine],
        delivery_method: Option<DeliveryMethod>,
    ) -> Result<OrderResponse, AppError> {
        ensure_distinct_products(lines)?;

        // 1. Inicia Transação
        let mut tx = self.pool.begin().await?;

        // 2. Vínculo aceito, travado até o commit
        self.link_repo
            .lock_accepted_for_pair(&mut *tx, supplier_id, consumer.consumer_id)
            .await?
            .ok_or_else(|| {
                AppError::forbidden("You must have an accepted link with this supplier to create an order")
            })?;

        // 3. Produtos travados em ordem de id
        let mut ids: Vec<i64> = lines.iter().map(|l| l.product_id).collect();
        ids.sort_unstable();
        let products: HashMap<i64, Product> = self
            .product_repo
            .lock_for_order(&mut *tx, &ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        // 4. Regras de negócio (puras)
        let priced = price_order(supplier_id, lines, &products, delivery_method)?;

        // 5. Baixa de estoque guardada
        for item in &priced.items {
            if !self
                .product_repo
                .decrement_stock(&mut *tx, item.product_id, item.quantity)
                .await?
            {
                let available = products.get(&item.product_id).map_or(0, |p| p.stock);
                return Err(AppError::InsufficientStock {
                    product_id: item.product_id,
                    product_name: item.product_name.clone(),
                    available,
                    requested: item.quantity,
                });
            }
        }

        // 6. Pedido e itens
        let order = self
            .order_repo
            .insert_order(
                &mut *tx,
                supplier_id,
                consumer.consumer_id,
                &priced,
                priced.estimated_delivery_date(Utc::now()),
                consumer.user_id,
            )
            .await?;

        let mut items = Vec::with_capacity(priced.items.len());
        for item in &priced.items {
            items.push(self.order_repo.insert_item(&mut *tx, order.id, item).await?);
        }

        let header = self
            .order_repo
            .find_header(&mut *tx, order.id)
            .await?
            .ok_or_else(|| AppError::not_found("Order"))?;

        tx.commit().await?;

        tracing::info!(
            order_id = order.id,
            supplier_id,
            consumer_id = consumer.consumer_id,
            total = %order.total_amount,
            actor_id = consumer.user_id,
            "✅ Order created"
        );

        Ok(OrderResponse::new(header, items))
    }

    pub async fn update_status(
        &self,
        identity: &Identity,
        order_id: i64,
        to: OrderStatus,
    ) -> Result<OrderResponse, AppError> {
        let order = self.find_order(order_id).await?;
        if !can_view_order(identity, &order) {
            return Err(AppError::not_found("Order"));
        }
        authorize_order_status_change(identity, &order, to)?;
        self.apply_transition(&order, to, identity.user_id).await
    }

    pub async fn cancel_by_consumer(&self, identity: &Identity, order_id: i64) -> Result<OrderResponse, AppError> {
        let order = self.find_order(order_id).await?;
        let consumer = authorize_consumer_cancel(identity, &order)?;
        self.apply_transition(&order, OrderStatus::Cancelled, consumer.user_id)
            .await
    }

    // CAS no status e devolução de estoque quando o destino libera a reserva
    async fn apply_transition(
        &self,
        order: &Order,
        to: OrderStatus,
        actor_id: i64,
    ) -> Result<OrderResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = match self
            .order_repo
            .update_status(&mut *tx, order.id, order.status, to)
            .await?
        {
            Some(updated) => updated,
            None => {
                tracing::warn!(order_id = order.id, expected = %order.status, "Order changed concurrently");
                return Err(AppError::StaleState);
            }
        };

        let items = self.order_repo.items_for_orders(&mut *tx, &[order.id]).await?;

        if restores_stock(to) {
            // Mesma ordem de lock da criação (id crescente)
            let mut restores: Vec<&OrderItem> = items.iter().collect();
            restores.sort_by_key(|item| item.product_id);
            let ids: Vec<i64> = restores.iter().map(|item| item.product_id).collect();
            self.product_repo.lock_for_order(&mut *tx, &ids).await?;

            for item in restores {
                self.product_repo
                    .restore_stock(&mut *tx, item.product_id, item.quantity)
                    .await?;
            }
        }

        let header = self
            .order_repo
            .find_header(&mut *tx, order.id)
            .await?
            .ok_or_else(|| AppError::not_found("Order"))?;

        tx.commit().await?;

        tracing::info!(
            order_id = order.id,
            from = %order.status,
            to = %updated.status,
            actor_id,
            "Order status changed"
        );

        Ok(OrderResponse::new(header, items))
    }

    pub async fn get_order(&self, identity: &Identity, order_id: i64) -> Result<OrderResponse, AppError> {
        let header = self
            .order_repo
            .find_header(&self.pool, order_id)
            .await?
            .filter(|h| can_view_order(identity, &h.order))
            .ok_or_else(|| AppError::not_found("Order"))?;

        let items = self.order_repo.items_for_orders(&self.pool, &[order_id]).await?;
        Ok(OrderResponse::new(header, items))
    }

    /// Pedidos como consumidor mais os dos fornecedores onde o usuário é equipe.
    pub async fn list_my_orders(&self, identity: &Identity) -> Result<Vec<OrderResponse>, AppError> {
        let headers = self
            .order_repo
            .list_visible(identity.consumer_id, &identity.staff_supplier_ids())
            .await?;

        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = headers.iter().map(|h| h.order.id).collect();
        let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for item in self.order_repo.items_for_orders(&self.pool, &ids).await? {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let items = items_by_order.remove(&header.order.id).unwrap_or_default();
                OrderResponse::new(header, items)
            })
            .collect())
    }

    async fn find_order(&self, order_id: i64) -> Result<Order, AppError> {
        self.order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order"))
    }
}
