// src/db/product_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::product::{Product, ProductPayload},
};

const PRODUCT_COLUMNS: &str = r#"
    id, supplier_id, name, description, unit, price, discount, stock,
    min_order_quantity, delivery_available, pickup_available, lead_time_days,
    is_active, created_at, updated_at
"#;

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active_for_supplier(&self, supplier_id: i64) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE supplier_id = $1 AND is_active ORDER BY name"
        ))
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// Trava as linhas dos produtos em ordem crescente de id (evita deadlock
    /// entre dois pedidos que compartilham produtos).
    pub async fn lock_for_order<'e, E>(&self, executor: E, ids: &[i64]) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1) ORDER BY id FOR UPDATE"
        ))
        .bind(ids)
        .fetch_all(executor)
        .await?;
        Ok(products)
    }

    /// Baixa guardada: retorna `false` se o estoque não comportar a quantidade.
    pub async fn decrement_stock<'e, E>(&self, executor: E, id: i64, quantity: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE products SET stock = stock - $2, updated_at = NOW() WHERE id = $1 AND stock >= $2",
        )
        .bind(id)
        .bind(quantity)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn restore_stock<'e, E>(&self, executor: E, id: i64, quantity: i32) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE products SET stock = stock + $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(quantity)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn create_product(&self, supplier_id: i64, payload: &ProductPayload) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (
                supplier_id, name, description, unit, price, discount, stock,
                min_order_quantity, delivery_available, pickup_available, lead_time_days
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(supplier_id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.unit)
        .bind(payload.price)
        .bind(payload.discount)
        .bind(payload.stock)
        .bind(payload.min_order_quantity)
        .bind(payload.delivery_available)
        .bind(payload.pickup_available)
        .bind(payload.lead_time_days)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn update_product(
        &self,
        supplier_id: i64,
        product_id: i64,
        payload: &ProductPayload,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products SET
                name = $3, description = $4, unit = $5, price = $6, discount = $7,
                stock = $8, min_order_quantity = $9, delivery_available = $10,
                pickup_available = $11, lead_time_days = $12, updated_at = NOW()
            WHERE id = $1 AND supplier_id = $2 AND is_active
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product_id)
        .bind(supplier_id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.unit)
        .bind(payload.price)
        .bind(payload.discount)
        .bind(payload.stock)
        .bind(payload.min_order_quantity)
        .bind(payload.delivery_available)
        .bind(payload.pickup_available)
        .bind(payload.lead_time_days)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    // Exclusão lógica: pedidos antigos continuam referenciando o produto
    pub async fn deactivate(&self, supplier_id: i64, product_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE products SET is_active = FALSE, updated_at = NOW() WHERE id = $1 AND supplier_id = $2 AND is_active",
        )
        .bind(product_id)
        .bind(supplier_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
