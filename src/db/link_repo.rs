// src/db/link_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::link::{Link, LinkStatus, LinkView},
};

const LINK_COLUMNS: &str = "id, supplier_id, consumer_id, status, requested_by, created_at, updated_at";

const LINK_VIEW_SELECT: &str = r#"
    SELECT l.id, l.supplier_id, l.consumer_id, l.status, l.requested_by,
           l.created_at, l.updated_at,
           s.name AS supplier_name, c.organization_name AS consumer_name
    FROM links l
    INNER JOIN suppliers s ON s.id = l.supplier_id
    INNER JOIN consumers c ON c.id = l.consumer_id
"#;

#[derive(Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(link)
    }

    pub async fn find_view(&self, id: i64) -> Result<Option<LinkView>, AppError> {
        let link = sqlx::query_as::<_, LinkView>(&format!("{LINK_VIEW_SELECT} WHERE l.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(link)
    }

    // Vínculos do consumidor e dos fornecedores onde o usuário é equipe
    pub async fn list_visible(
        &self,
        consumer_id: Option<i64>,
        supplier_ids: &[i64],
    ) -> Result<Vec<LinkView>, AppError> {
        let links = sqlx::query_as::<_, LinkView>(&format!(
            "{LINK_VIEW_SELECT} WHERE l.consumer_id = $1 OR l.supplier_id = ANY($2) ORDER BY l.created_at DESC"
        ))
        .bind(consumer_id)
        .bind(supplier_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(links)
    }

    /// Vínculo não removido do par, se existir.
    pub async fn find_active_for_pair(
        &self,
        supplier_id: i64,
        consumer_id: i64,
    ) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE supplier_id = $1 AND consumer_id = $2 AND status <> 'removed'"
        ))
        .bind(supplier_id)
        .bind(consumer_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(link)
    }

    /// Vínculo aceito do par, travado `FOR SHARE` até o fim da transação.
    /// Impede que o vínculo seja bloqueado/removido enquanto o pedido é gravado.
    pub async fn lock_accepted_for_pair<'e, E>(
        &self,
        executor: E,
        supplier_id: i64,
        consumer_id: i64,
    ) -> Result<Option<Link>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let link = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE supplier_id = $1 AND consumer_id = $2 AND status = 'accepted' FOR SHARE"
        ))
        .bind(supplier_id)
        .bind(consumer_id)
        .fetch_optional(executor)
        .await?;
        Ok(link)
    }

    pub async fn is_accepted(&self, supplier_id: i64, consumer_id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM links WHERE supplier_id = $1 AND consumer_id = $2 AND status = 'accepted')",
        )
        .bind(supplier_id)
        .bind(consumer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    // O índice parcial idx_links_active_pair garante a unicidade mesmo com requisições concorrentes
    pub async fn create_link(
        &self,
        supplier_id: i64,
        consumer_id: i64,
        requested_by: i64,
    ) -> Result<Link, AppError> {
        sqlx::query_as::<_, Link>(&format!(
            r#"
            INSERT INTO links (supplier_id, consumer_id, status, requested_by)
            VALUES ($1, $2, 'pending', $3)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(supplier_id)
        .bind(consumer_id)
        .bind(requested_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() && db_err.constraint() == Some("idx_links_active_pair") {
                    return AppError::DuplicateLink;
                }
            }
            e.into()
        })
    }

    /// Compare-and-swap: só altera se o status ainda for `from`.
    pub async fn update_status(
        &self,
        id: i64,
        from: LinkStatus,
        to: LinkStatus,
    ) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            r#"
            UPDATE links SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await?;
        Ok(link)
    }
}
