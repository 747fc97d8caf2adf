use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para ergonomia.
// Cada variante de negócio tem um `kind` estável que o cliente pode testar
// sem precisar interpretar a mensagem.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Invalid or missing authentication token")]
    InvalidToken,

    #[error("User is inactive")]
    InactiveUser,

    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Consumer profile already exists for this user")]
    ConsumerProfileExists,

    #[error("User already has a role in this supplier")]
    StaffMemberExists,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Cannot change status from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Link already exists between this consumer and supplier")]
    DuplicateLink,

    #[error("Product {product_id} not found or not available")]
    ProductNotFound { product_id: i64 },

    #[error("Quantity for product {product_name} must be at least {minimum}")]
    BelowMinimumOrder {
        product_id: i64,
        product_name: String,
        minimum: i32,
        requested: i32,
    },

    // Mantém o texto legado que os clientes antigos fazem parse
    #[error("Product '{product_name}' is out of stock. Available: {available}, Required: {requested}")]
    InsufficientStock {
        product_id: i64,
        product_name: String,
        available: i32,
        requested: i32,
    },

    #[error("A delivery method compatible with every product is required")]
    DeliveryMethodRequired { product_id: Option<i64> },

    #[error("The resource was modified by another request")]
    StaleState,

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::Forbidden(message.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn invalid_transition(from: impl ToString, to: impl ToString) -> Self {
        AppError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Código estável exposto no corpo da resposta.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => "VALIDATION_ERROR",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::InactiveUser => "INACTIVE_USER",
            AppError::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            AppError::ConsumerProfileExists => "CONSUMER_PROFILE_EXISTS",
            AppError::StaffMemberExists => "STAFF_MEMBER_EXISTS",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidTransition { .. } => "INVALID_TRANSITION",
            AppError::DuplicateLink => "DUPLICATE_LINK",
            AppError::ProductNotFound { .. } => "PRODUCT_NOT_FOUND",
            AppError::BelowMinimumOrder { .. } => "BELOW_MINIMUM_ORDER",
            AppError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            AppError::DeliveryMethodRequired { .. } => "DELIVERY_METHOD_REQUIRED",
            AppError::StaleState => "STALE_STATE",
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::BelowMinimumOrder { .. }
            | AppError::DeliveryMethodRequired { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::InactiveUser | AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::ProductNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists
            | AppError::ConsumerProfileExists
            | AppError::StaffMemberExists
            | AppError::InvalidTransition { .. }
            | AppError::DuplicateLink
            | AppError::InsufficientStock { .. }
            | AppError::StaleState => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Campos estruturados extras (ex: quantidades de estoque).
    fn details(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        match self {
            AppError::ValidationError(errors) => {
                let mut details = Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .map(Value::String)
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                fields.insert("details".into(), Value::Object(details));
            }
            AppError::InvalidTransition { from, to } => {
                fields.insert("from".into(), json!(from));
                fields.insert("to".into(), json!(to));
            }
            AppError::ProductNotFound { product_id } => {
                fields.insert("productId".into(), json!(product_id));
            }
            AppError::BelowMinimumOrder { product_id, minimum, requested, .. } => {
                fields.insert("productId".into(), json!(product_id));
                fields.insert("minimum".into(), json!(minimum));
                fields.insert("requested".into(), json!(requested));
            }
            AppError::InsufficientStock { product_id, product_name, available, requested } => {
                fields.insert("productId".into(), json!(product_id));
                fields.insert("productName".into(), json!(product_name));
                fields.insert("available".into(), json!(available));
                fields.insert("requested".into(), json!(requested));
            }
            AppError::DeliveryMethodRequired { product_id: Some(product_id) } => {
                fields.insert("productId".into(), json!(product_id));
            }
            _ => {}
        }
        fields
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Erros internos: loga o detalhe e devolve mensagem genérica
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal server error: {:?}", self);
            "An unexpected error occurred.".to_string()
        } else {
            self.to_string()
        };

        let mut body = self.details();
        body.insert("kind".into(), json!(self.kind()));
        body.insert("error".into(), json!(message));

        (status, Json(Value::Object(body))).into_response()
    }
}
