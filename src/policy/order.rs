// src/policy/order.rs

//! Regras puras de pedido: motor de preço/validação e máquina de estados.
//! Nada aqui toca no banco; o serviço carrega os produtos (com lock) e chama `price_order`.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::common::error::AppError;
use crate::models::order::{Order, OrderStatus};
use crate::models::product::{DeliveryMethod, Product};
use crate::policy::identity::{ConsumerActor, Identity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedItem {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub items: Vec<PricedItem>,
    pub total_amount: Decimal,
    pub delivery_method: Option<DeliveryMethod>,
    pub max_lead_time_days: i32,
}

impl PricedOrder {
    pub fn estimated_delivery_date(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        (self.max_lead_time_days > 0).then(|| now + Duration::days(i64::from(self.max_lead_time_days)))
    }
}

/// Maior valor que cabe em `NUMERIC(14, 2)` (totais de item e de pedido).
pub const MAX_ORDER_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Preço unitário com desconto percentual, arredondado a centavos.
pub fn unit_price(product: &Product) -> Decimal {
    let price = match product.discount {
        Some(discount) if discount > Decimal::ZERO => {
            product.price * (Decimal::ONE - discount / Decimal::ONE_HUNDRED)
        }
        _ => product.price,
    };
    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn ensure_distinct_products(lines: &[OrderLine]) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(lines.len());
    for line in lines {
        if !seen.insert(line.product_id) {
            return Err(AppError::InvalidInput(format!(
                "Product {} appears more than once in the order",
                line.product_id
            )));
        }
    }
    Ok(())
}

/// Valida e precifica um pedido contra o estado atual dos produtos.
///
/// Por item, na ordem pedida: `ProductNotFound` (ausente, inativo ou de outro
/// fornecedor), `BelowMinimumOrder`, `InsufficientStock`. Depois de todos os
/// itens, a compatibilidade do método de entrega.
pub fn price_order(
    supplier_id: i64,
    lines: &[OrderLine],
    products: &HashMap<i64, Product>,
    delivery_method: Option<DeliveryMethod>,
) -> Result<PricedOrder, AppError> {
    if lines.is_empty() {
        return Err(AppError::InvalidInput(
            "The order must have at least one item.".into(),
        ));
    }
    ensure_distinct_products(lines)?;

    let mut items = Vec::with_capacity(lines.len());
    let mut selected: Vec<&Product> = Vec::with_capacity(lines.len());
    let mut total_amount = Decimal::ZERO;

    for line in lines {
        if line.quantity < 1 {
            return Err(AppError::InvalidInput(
                "The quantity must be at least 1.".into(),
            ));
        }

        let product = products
            .get(&line.product_id)
            .filter(|p| p.is_active && p.supplier_id == supplier_id)
            .ok_or(AppError::ProductNotFound {
                product_id: line.product_id,
            })?;

        if line.quantity < product.min_order_quantity {
            return Err(AppError::BelowMinimumOrder {
                product_id: product.id,
                product_name: product.name.clone(),
                minimum: product.min_order_quantity,
                requested: line.quantity,
            });
        }

        if line.quantity > product.stock {
            return Err(AppError::InsufficientStock {
                product_id: product.id,
                product_name: product.name.clone(),
                available: product.stock,
                requested: line.quantity,
            });
        }

        let unit_price = unit_price(product);
        let total_price = unit_price * Decimal::from(line.quantity);
        total_amount += total_price;
        if total_price > MAX_ORDER_AMOUNT || total_amount > MAX_ORDER_AMOUNT {
            return Err(AppError::InvalidInput(format!(
                "The order total exceeds the maximum of {MAX_ORDER_AMOUNT}"
            )));
        }

        items.push(PricedItem {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity: line.quantity,
            unit_price,
            total_price,
        });
        selected.push(product);
    }

    check_delivery_method(&selected, delivery_method)?;

    let max_lead_time_days = selected
        .iter()
        .map(|p| p.lead_time_days)
        .max()
        .unwrap_or(0);

    Ok(PricedOrder {
        items,
        total_amount,
        delivery_method,
        max_lead_time_days,
    })
}

fn check_delivery_method(
    products: &[&Product],
    delivery_method: Option<DeliveryMethod>,
) -> Result<(), AppError> {
    match delivery_method {
        Some(method) => {
            if let Some(p) = products.iter().find(|p| !p.supports(method)) {
                return Err(AppError::DeliveryMethodRequired {
                    product_id: Some(p.id),
                });
            }
            Ok(())
        }
        None => {
            // Sem método só é aceito quando todos os produtos oferecem as duas opções
            if let Some(p) = products
                .iter()
                .find(|p| !(p.delivery_available && p.pickup_available))
            {
                return Err(AppError::DeliveryMethodRequired {
                    product_id: Some(p.id),
                });
            }
            Ok(())
        }
    }
}

// --- Máquina de estados ---

pub fn is_order_edge(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pending, Accepted) | (Pending, Rejected) | (Accepted, Fulfilled) | (Accepted, Cancelled)
    )
}

/// Estados de destino que devolvem o estoque reservado.
pub fn restores_stock(to: OrderStatus) -> bool {
    matches!(to, OrderStatus::Rejected | OrderStatus::Cancelled)
}

pub fn can_view_order(identity: &Identity, order: &Order) -> bool {
    identity.is_platform_admin()
        || identity.consumer_id == Some(order.consumer_id)
        || identity.is_supplier_staff(Some(order.supplier_id))
}

/// Mudança de status pela equipe (OWNER/MANAGER do fornecedor do pedido).
pub fn authorize_order_status_change(
    identity: &Identity,
    order: &Order,
    to: OrderStatus,
) -> Result<(), AppError> {
    let is_staff = identity.is_supplier_staff(Some(order.supplier_id));
    if !is_staff && identity.consumer_id != Some(order.consumer_id) {
        return Err(AppError::forbidden("You are not part of this order"));
    }

    if !is_order_edge(order.status, to) {
        return Err(AppError::invalid_transition(order.status, to));
    }

    let staff = identity.as_staff_of(order.supplier_id)?;
    if !staff.role.is_owner_or_manager() {
        return Err(AppError::forbidden(
            "Only supplier owners or managers can update order status",
        ));
    }
    staff.ensure_not_own_consumer(order.consumer_id)
}

/// Cancelamento pelo próprio consumidor: só pedidos já aceitos.
pub fn authorize_consumer_cancel(
    identity: &Identity,
    order: &Order,
) -> Result<ConsumerActor, AppError> {
    let consumer = identity.as_consumer()?;
    if order.consumer_id != consumer.consumer_id {
        return Err(AppError::not_found("Order"));
    }
    if order.status != OrderStatus::Accepted {
        return Err(AppError::invalid_transition(order.status, OrderStatus::Cancelled));
    }
    Ok(consumer)
}

/// Reorder: apenas pedidos do próprio consumidor, aceitos ou entregues.
pub fn authorize_reorder(identity: &Identity, order: &Order) -> Result<ConsumerActor, AppError> {
    let consumer = identity.as_consumer()?;
    if order.consumer_id != consumer.consumer_id {
        return Err(AppError::not_found("Order"));
    }
    if !matches!(order.status, OrderStatus::Accepted | OrderStatus::Fulfilled) {
        return Err(AppError::invalid_transition(order.status, "reorder"));
    }
    Ok(consumer)
}
