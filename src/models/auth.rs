// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "global_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlobalRole {
    PlatformAdmin,
}

// Cargo dentro de um fornecedor específico
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "supplier_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplierRole {
    Owner,
    Manager,
    Sales,
}

impl SupplierRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierRole::Owner => "OWNER",
            SupplierRole::Manager => "MANAGER",
            SupplierRole::Sales => "SALES",
        }
    }

    pub fn is_owner_or_manager(&self) -> bool {
        matches!(self, SupplierRole::Owner | SupplierRole::Manager)
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub is_active: bool,
    pub global_role: Option<GlobalRole>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha da tabela supplier_staff
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: i64,
    pub supplier_id: i64,
    pub user_id: i64,
    pub role: SupplierRole,
    pub created_at: DateTime<Utc>,
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRoleInfo {
    pub supplier_id: i64,
    pub role: SupplierRole,
}

// Usuário público, com os papéis resolvidos
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserOut {
    #[schema(example = 42)]
    pub id: i64,
    #[schema(example = "buyer@school.org")]
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub global_role: Option<GlobalRole>,
    pub supplier_roles: Vec<SupplierRoleInfo>,
    pub consumer_id: Option<i64>,
    #[schema(example = "CONSUMER")]
    pub main_role: String,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "The e-mail is invalid."))]
    pub email: String,
    #[validate(length(min = 6, message = "The password must have at least 6 characters."))]
    pub password: String,
    #[validate(length(min = 1, message = "The full name is required."))]
    pub full_name: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "The e-mail is invalid."))]
    pub email: String,
    #[validate(length(min = 1, message = "The password is required."))]
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mobile,
    Web,
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub platform: Option<Platform>,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    pub user: UserOut,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,   // ID do usuário
    pub exp: usize, // Expiração
    pub iat: usize, // Emitido em
}
