// src/models/product.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "delivery_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Delivery,
    Pickup,
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMethod::Delivery => f.write_str("delivery"),
            DeliveryMethod::Pickup => f.write_str("pickup"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub supplier_id: i64,
    #[schema(example = "Arroz tipo 1")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "kg")]
    pub unit: String,
    #[schema(example = "12.50")]
    pub price: Decimal,
    // Percentual
    #[schema(example = "10.00")]
    pub discount: Option<Decimal>,
    pub stock: i32,
    pub min_order_quantity: i32,
    pub delivery_available: bool,
    pub pickup_available: bool,
    pub lead_time_days: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn supports(&self, method: DeliveryMethod) -> bool {
        match method {
            DeliveryMethod::Delivery => self.delivery_available,
            DeliveryMethod::Pickup => self.pickup_available,
        }
    }
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("The value cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_percentage(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() || *val > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("range");
        err.message = Some("The discount must be between 0 and 100.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "The name is required."))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(min = 1, message = "The unit is required."))]
    pub unit: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[validate(custom(function = "validate_percentage"))]
    pub discount: Option<Decimal>,

    #[validate(range(min = 0, message = "The stock cannot be negative."))]
    #[serde(default)]
    pub stock: i32,

    #[validate(range(min = 1, message = "The minimum order quantity must be at least 1."))]
    #[serde(default = "default_min_order_quantity")]
    pub min_order_quantity: i32,

    #[serde(default = "default_true")]
    pub delivery_available: bool,

    #[serde(default = "default_true")]
    pub pickup_available: bool,

    #[validate(range(min = 0, message = "The lead time cannot be negative."))]
    #[serde(default)]
    pub lead_time_days: i32,
}

fn default_min_order_quantity() -> i32 {
    1
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub supplier_id: Option<i64>,
}
