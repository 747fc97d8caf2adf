// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{ConsumerRepository, SupplierRepository, UserRepository},
    models::auth::{Claims, LoginResponse, Platform, User, UserOut},
    policy::Identity,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    supplier_repo: SupplierRepository,
    consumer_repo: ConsumerRepository,
    jwt_secret: String,
    token_ttl_minutes: i64,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        supplier_repo: SupplierRepository,
        consumer_repo: ConsumerRepository,
        jwt_secret: String,
        token_ttl_minutes: i64,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            supplier_repo,
            consumer_repo,
            jwt_secret,
            token_ttl_minutes,
            pool,
        }
    }

    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<UserOut, AppError> {
        // 1. Hashing fora do executor async
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Password hashing task failed: {}", e))??;

        // 2. Cria o usuário (e-mail duplicado vira EmailAlreadyExists)
        let user = self
            .user_repo
            .create_user(&self.pool, email, &hashed_password, full_name)
            .await?;

        tracing::info!(user_id = user.id, "✅ User registered");

        // Usuário novo ainda não tem cargos nem perfil de consumidor
        Ok(Identity::new(&user, [], None).to_user_out())
    }

    pub async fn login_user(
        &self,
        email: &str,
        password: &str,
        platform: Option<Platform>,
    ) -> Result<LoginResponse, AppError> {
        // E-mail desconhecido e senha errada geram o mesmo erro
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Password verification task failed: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AppError::InactiveUser);
        }

        let identity = self.load_identity(&user).await?;

        // Plataforma errada: mesma resposta genérica, sem revelar o motivo
        if !identity.allows_login_on(platform) {
            tracing::info!(user_id = user.id, ?platform, "Login refused for platform");
            return Err(AppError::InvalidCredentials);
        }

        let access_token = self.create_token(user.id)?;

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: identity.to_user_out(),
        })
    }

    /// Valida o token e monta a identidade completa do usuário.
    pub async fn validate_token(&self, token: &str) -> Result<Identity, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            return Err(AppError::InactiveUser);
        }

        self.load_identity(&user).await
    }

    async fn load_identity(&self, user: &User) -> Result<Identity, AppError> {
        let memberships = self.supplier_repo.memberships_for_user(user.id).await?;
        let consumer_id = self.consumer_repo.find_id_by_user(user.id).await?;
        Ok(Identity::new(user, memberships, consumer_id))
    }

    fn create_token(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.token_ttl_minutes);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
