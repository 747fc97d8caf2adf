// src/db/supplier_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{
        auth::{StaffMember, SupplierRole},
        supplier::{CreateSupplierPayload, Supplier},
    },
    policy::SupplierMembership,
};

const SUPPLIER_COLUMNS: &str = "id, name, description, contact_email, contact_phone, address, is_active, created_at, updated_at";

// Fornecedores e sua equipe (supplier_staff)
#[derive(Clone)]
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE is_active ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(suppliers)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(supplier)
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT s.id, s.name, s.description, s.contact_email, s.contact_phone,
                   s.address, s.is_active, s.created_at, s.updated_at
            FROM suppliers s
            INNER JOIN supplier_staff ss ON ss.supplier_id = s.id
            WHERE ss.user_id = $1
            ORDER BY s.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(suppliers)
    }

    pub async fn create_supplier<'e, E>(
        &self,
        executor: E,
        payload: &CreateSupplierPayload,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            r#"
            INSERT INTO suppliers (name, description, contact_email, contact_phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SUPPLIER_COLUMNS}
            "#
        ))
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.contact_email)
        .bind(&payload.contact_phone)
        .bind(&payload.address)
        .fetch_one(executor)
        .await?;
        Ok(supplier)
    }

    pub async fn deactivate(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE suppliers SET is_active = FALSE, updated_at = NOW() WHERE id = $1 AND is_active",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- EQUIPE ---

    pub async fn add_staff<'e, E>(
        &self,
        executor: E,
        supplier_id: i64,
        user_id: i64,
        role: SupplierRole,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("INSERT INTO supplier_staff (supplier_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(supplier_id)
            .bind(user_id)
            .bind(role)
            .execute(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation()
                        && db_err.constraint() == Some("supplier_staff_user_supplier_key")
                    {
                        return AppError::StaffMemberExists;
                    }
                }
                AppError::from(e)
            })?;
        Ok(())
    }

    pub async fn list_staff(&self, supplier_id: i64) -> Result<Vec<StaffMember>, AppError> {
        let staff = sqlx::query_as::<_, StaffMember>(
            r#"
            SELECT ss.id, ss.supplier_id, ss.user_id, ss.role, ss.created_at,
                   u.email, u.full_name
            FROM supplier_staff ss
            INNER JOIN users u ON u.id = ss.user_id
            WHERE ss.supplier_id = $1
            ORDER BY ss.role, u.full_name
            "#,
        )
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(staff)
    }

    pub async fn find_staff_role(
        &self,
        supplier_id: i64,
        user_id: i64,
    ) -> Result<Option<SupplierRole>, AppError> {
        let role = sqlx::query_scalar::<_, SupplierRole>(
            "SELECT role FROM supplier_staff WHERE supplier_id = $1 AND user_id = $2",
        )
        .bind(supplier_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(role)
    }

    pub async fn remove_staff(&self, supplier_id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM supplier_staff WHERE supplier_id = $1 AND user_id = $2")
            .bind(supplier_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // Todos os cargos do usuário, usados para montar a identidade
    pub async fn memberships_for_user(&self, user_id: i64) -> Result<Vec<SupplierMembership>, AppError> {
        let rows = sqlx::query_as::<_, (i64, SupplierRole)>(
            "SELECT supplier_id, role FROM supplier_staff WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(supplier_id, role)| SupplierMembership { supplier_id, role })
            .collect())
    }
}
