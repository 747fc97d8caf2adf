// src/db/order_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::order::{Order, OrderHeader, OrderItem, OrderStatus},
    policy::order::{PricedItem, PricedOrder},
};

const ORDER_COLUMNS: &str = r#"
    id, supplier_id, consumer_id, status, total_amount, delivery_method,
    estimated_delivery_date, created_by, created_at, updated_at
"#;

const ORDER_HEADER_SELECT: &str = r#"
    SELECT o.id, o.supplier_id, o.consumer_id, o.status, o.total_amount,
           o.delivery_method, o.estimated_delivery_date, o.created_by,
           o.created_at, o.updated_at,
           s.name AS supplier_name, c.organization_name AS consumer_name
    FROM orders o
    INNER JOIN suppliers s ON s.id = o.supplier_id
    INNER JOIN consumers c ON c.id = o.consumer_id
"#;

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    pub async fn find_header<'e, E>(&self, executor: E, id: i64) -> Result<Option<OrderHeader>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let header = sqlx::query_as::<_, OrderHeader>(&format!("{ORDER_HEADER_SELECT} WHERE o.id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(header)
    }

    pub async fn list_visible(
        &self,
        consumer_id: Option<i64>,
        supplier_ids: &[i64],
    ) -> Result<Vec<OrderHeader>, AppError> {
        let headers = sqlx::query_as::<_, OrderHeader>(&format!(
            "{ORDER_HEADER_SELECT} WHERE o.consumer_id = $1 OR o.supplier_id = ANY($2) ORDER BY o.created_at DESC, o.id DESC"
        ))
        .bind(consumer_id)
        .bind(supplier_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(headers)
    }

    pub async fn items_for_orders<'e, E>(&self, executor: E, order_ids: &[i64]) -> Result<Vec<OrderItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name,
                   oi.quantity, oi.unit_price, oi.total_price
            FROM order_items oi
            INNER JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.order_id, oi.id
            "#,
        )
        .bind(order_ids)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        supplier_id: i64,
        consumer_id: i64,
        priced: &PricedOrder,
        estimated_delivery_date: Option<DateTime<Utc>>,
        created_by: i64,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (
                supplier_id, consumer_id, status, total_amount, delivery_method,
                estimated_delivery_date, created_by
            )
            VALUES ($1, $2, 'pending', $3, $4, $5, $6)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(supplier_id)
        .bind(consumer_id)
        .bind(priced.total_amount)
        .bind(priced.delivery_method)
        .bind(estimated_delivery_date)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        order_id: i64,
        item: &PricedItem,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, unit_price, total_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.total_price)
        .fetch_one(executor)
        .await?;

        Ok(OrderItem {
            id,
            order_id,
            product_id: item.product_id,
            product_name: item.product_name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
        })
    }

    /// Compare-and-swap do status; `None` quando outro request mudou o pedido antes.
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(executor)
        .await?;
        Ok(order)
    }
}
