// src/models/order.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::product::DeliveryMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Rejected,
    Fulfilled,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Fulfilled => "fulfilled",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub supplier_id: i64,
    pub consumer_id: i64,
    pub status: OrderStatus,
    #[schema(example = "150.50")]
    pub total_amount: Decimal,
    pub delivery_method: Option<DeliveryMethod>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Item com o nome do produto (join com products)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    #[schema(example = 5)]
    pub quantity: i32,
    #[schema(example = "11.25")]
    pub unit_price: Decimal,
    #[schema(example = "56.25")]
    pub total_price: Decimal,
}

// Pedido com os nomes das partes (join com suppliers/consumers)
#[derive(Debug, Clone, FromRow)]
pub struct OrderHeader {
    #[sqlx(flatten)]
    pub order: Order,
    pub supplier_name: String,
    pub consumer_name: String,
}

// Pedido completo devolvido pela API
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub supplier_name: String,
    pub consumer_name: String,
    pub items: Vec<OrderItem>,
}

impl OrderResponse {
    pub fn new(header: OrderHeader, items: Vec<OrderItem>) -> Self {
        Self {
            order: header.order,
            supplier_name: header.supplier_name,
            consumer_name: header.consumer_name,
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
    #[schema(example = 12)]
    pub product_id: i64,
    #[validate(range(min = 1, message = "The quantity must be at least 1."))]
    #[schema(example = 5)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[schema(example = 3)]
    pub supplier_id: i64,
    #[validate(length(min = 1, message = "The order must have at least one item."), nested)]
    pub items: Vec<OrderLinePayload>,
    pub delivery_method: Option<DeliveryMethod>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusPayload {
    #[schema(example = "accepted")]
    pub new_status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(body: serde_json::Value) -> CreateOrderPayload {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn create_order_payload_validates_items() {
        let ok = payload(json!({ "supplierId": 3, "items": [{ "productId": 1, "quantity": 2 }] }));
        assert!(ok.validate().is_ok());
        assert_eq!(ok.delivery_method, None);

        let empty = payload(json!({ "supplierId": 3, "items": [] }));
        let errors = empty.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));

        let zero = payload(json!({
            "supplierId": 3,
            "items": [{ "productId": 1, "quantity": 0 }],
            "deliveryMethod": "pickup"
        }));
        assert_eq!(zero.delivery_method, Some(DeliveryMethod::Pickup));
        assert!(zero.validate().is_err());
    }
}
