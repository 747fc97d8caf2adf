// src/config.rs

use std::{env, str::FromStr, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        ChatRepository, ComplaintRepository, ConsumerRepository, LinkRepository, OrderRepository,
        ProductRepository, SupplierRepository, UserRepository,
    },
    services::{
        auth::AuthService, chat_service::ChatService, complaint_service::ComplaintService,
        link_service::LinkService, order_service::OrderService, product_service::ProductService,
        supplier_service::SupplierService,
    },
};

/// Configuração lida uma única vez na inicialização.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_expire_minutes: i64,
    pub bind_addr: String,
    pub database_max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // .env é opcional (produção usa variáveis reais)
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            access_token_expire_minutes: parse_or("ACCESS_TOKEN_EXPIRE_MINUTES", 30)?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub supplier_service: SupplierService,
    pub link_service: LinkService,
    pub product_service: ProductService,
    pub order_service: OrderService,
    pub complaint_service: ComplaintService,
    pub chat_service: ChatService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Failed to connect to the database")?;

        tracing::info!("✅ Database connection established");

        Ok(Self::from_pool(db_pool, config))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, config: &Config) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let supplier_repo = SupplierRepository::new(db_pool.clone());
        let consumer_repo = ConsumerRepository::new(db_pool.clone());
        let link_repo = LinkRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let complaint_repo = ComplaintRepository::new(db_pool.clone());
        let chat_repo = ChatRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            supplier_repo.clone(),
            consumer_repo.clone(),
            config.jwt_secret.clone(),
            config.access_token_expire_minutes,
            db_pool.clone(),
        );
        let supplier_service = SupplierService::new(
            supplier_repo.clone(),
            consumer_repo,
            user_repo,
            db_pool.clone(),
        );
        let link_service = LinkService::new(link_repo.clone(), supplier_repo, db_pool.clone());
        let product_service = ProductService::new(product_repo.clone(), link_repo.clone());
        let order_service = OrderService::new(
            order_repo.clone(),
            product_repo,
            link_repo.clone(),
            db_pool.clone(),
        );
        let complaint_service = ComplaintService::new(complaint_repo, order_repo.clone(), db_pool.clone());
        let chat_service = ChatService::new(chat_repo, link_repo, order_repo);

        Self {
            db_pool,
            auth_service,
            supplier_service,
            link_service,
            product_service,
            order_service,
            complaint_service,
            chat_service,
        }
    }
}
