mod common;

use axum::{
    http::{Method, StatusCode},
    Router,
};
use serde_json::{json, Value};

use common::{db_app, login, register_and_login, send};

struct Supplier {
    id: i64,
    owner: String,
    manager: String,
    sales: String,
}

struct Consumer {
    id: i64,
    token: String,
}

async fn setup_supplier(app: &Router) -> Supplier {
    let (owner, _, _) = register_and_login(app, "owner").await;
    let (status, supplier) = send(
        app,
        Method::POST,
        "/api/suppliers",
        Some(owner.as_str()),
        Some(json!({ "name": "Distribuidora Central" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{supplier}");
    let id = supplier["id"].as_i64().unwrap();

    let mut staff = Vec::new();
    for role in ["MANAGER", "SALES"] {
        let (token, _, email) = register_and_login(app, &role.to_lowercase()).await;
        let (status, body) = send(
            app,
            Method::POST,
            &format!("/api/suppliers/{id}/staff"),
            Some(owner.as_str()),
            Some(json!({ "email": email, "role": role })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        staff.push(token);
    }
    let sales = staff.pop().unwrap();
    let manager = staff.pop().unwrap();

    Supplier { id, owner, manager, sales }
}

async fn setup_consumer(app: &Router) -> Consumer {
    let (token, _, _) = register_and_login(app, "consumer").await;
    let (status, consumer) = send(
        app,
        Method::POST,
        "/api/consumers",
        Some(token.as_str()),
        Some(json!({ "organizationName": "Escola Municipal Norte" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{consumer}");
    Consumer { id: consumer["id"].as_i64().unwrap(), token }
}

async fn accepted_link(app: &Router, supplier: &Supplier, consumer: &Consumer) -> i64 {
    let (status, link) = send(
        app,
        Method::POST,
        "/api/links",
        Some(consumer.token.as_str()),
        Some(json!({ "supplierId": supplier.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{link}");
    assert_eq!(link["status"], "pending");
    let link_id = link["id"].as_i64().unwrap();

    let (status, link) = send(
        app,
        Method::POST,
        &format!("/api/links/{link_id}/status"),
        Some(supplier.manager.as_str()),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{link}");
    assert_eq!(link["status"], "accepted");
    link_id
}

async fn create_product(app: &Router, supplier: &Supplier, stock: i32, min_order: i32) -> i64 {
    let (status, product) = send(
        app,
        Method::POST,
        &format!("/api/suppliers/{}/products", supplier.id),
        Some(supplier.owner.as_str()),
        Some(json!({
            "name": "Arroz tipo 1",
            "unit": "kg",
            "price": 10.0,
            "stock": stock,
            "minOrderQuantity": min_order,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{product}");
    product["id"].as_i64().unwrap()
}

async fn product_stock(app: &Router, token: &str, supplier_id: i64, product_id: i64) -> i64 {
    let (status, products) = send(
        app,
        Method::GET,
        &format!("/api/products?supplier_id={supplier_id}"),
        Some(token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{products}");
    products
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"].as_i64() == Some(product_id))
        .map(|p| p["stock"].as_i64().unwrap())
        .unwrap()
}

fn order_body(supplier_id: i64, items: &[(i64, i32)]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|(product_id, quantity)| json!({ "productId": product_id, "quantity": quantity }))
        .collect();
    json!({ "supplierId": supplier_id, "items": items, "deliveryMethod": "delivery" })
}

async fn my_orders(app: &Router, token: &str) -> Vec<Value> {
    let (status, orders) = send(app, Method::GET, "/api/orders/my", Some(token), None).await;
    assert_eq!(status, StatusCode::OK, "{orders}");
    orders.as_array().unwrap().clone()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn order_then_reorder_with_short_stock() {
    let (app, _pool) = db_app().await;
    let supplier = setup_supplier(&app).await;
    let consumer = setup_consumer(&app).await;
    accepted_link(&app, &supplier, &consumer).await;
    let product_id = create_product(&app, &supplier, 10, 2).await;

    let (status, order) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(consumer.token.as_str()),
        Some(order_body(supplier.id, &[(product_id, 5)])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{order}");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["totalAmount"].as_f64(), Some(50.0));
    assert_eq!(order["items"].as_array().unwrap().len(), 1);
    let order_id = order["id"].as_i64().unwrap();
    assert_eq!(product_stock(&app, &consumer.token, supplier.id, product_id).await, 5);

    let (status, accepted) = send(
        &app,
        Method::POST,
        &format!("/api/orders/{order_id}/status"),
        Some(supplier.owner.as_str()),
        Some(json!({ "newStatus": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{accepted}");
    assert_eq!(accepted["status"], "accepted");

    // Estoque cai para 3 antes do novo pedido
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/suppliers/{}/products/{product_id}", supplier.id),
        Some(supplier.owner.as_str()),
        Some(json!({ "name": "Arroz tipo 1", "unit": "kg", "price": 10.0, "stock": 3, "minOrderQuantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, err) = send(
        &app,
        Method::POST,
        &format!("/api/orders/{order_id}/reorder"),
        Some(consumer.token.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{err}");
    assert_eq!(err["kind"], "INSUFFICIENT_STOCK");
    assert_eq!(err["productId"].as_i64(), Some(product_id));
    assert_eq!(err["available"].as_i64(), Some(3));
    assert_eq!(err["requested"].as_i64(), Some(5));

    assert_eq!(my_orders(&app, &consumer.token).await.len(), 1);
    assert_eq!(product_stock(&app, &consumer.token, supplier.id, product_id).await, 3);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn order_creation_is_all_or_nothing() {
    let (app, _pool) = db_app().await;
    let supplier = setup_supplier(&app).await;
    let consumer = setup_consumer(&app).await;
    accepted_link(&app, &supplier, &consumer).await;
    let plenty = create_product(&app, &supplier, 100, 1).await;
    let scarce = create_product(&app, &supplier, 2, 1).await;

    let (status, err) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(consumer.token.as_str()),
        Some(order_body(supplier.id, &[(plenty, 10), (scarce, 5)])),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{err}");
    assert_eq!(err["kind"], "INSUFFICIENT_STOCK");
    assert_eq!(err["productId"].as_i64(), Some(scarce));

    assert_eq!(product_stock(&app, &consumer.token, supplier.id, plenty).await, 100);
    assert_eq!(product_stock(&app, &consumer.token, supplier.id, scarce).await, 2);
    assert!(my_orders(&app, &consumer.token).await.is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn concurrent_orders_never_oversell() {
    let (app, _pool) = db_app().await;
    let supplier = setup_supplier(&app).await;
    let first = setup_consumer(&app).await;
    let second = setup_consumer(&app).await;
    accepted_link(&app, &supplier, &first).await;
    accepted_link(&app, &supplier, &second).await;
    let product_id = create_product(&app, &supplier, 5, 1).await;

    let body = order_body(supplier.id, &[(product_id, 5)]);
    let (a, b) = tokio::join!(
        send(&app, Method::POST, "/api/orders", Some(first.token.as_str()), Some(body.clone())),
        send(&app, Method::POST, "/api/orders", Some(second.token.as_str()), Some(body)),
    );

    let mut statuses = [a.0, b.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
    let failure = if a.0 == StatusCode::CONFLICT { a.1 } else { b.1 };
    assert_eq!(failure["kind"], "INSUFFICIENT_STOCK");

    assert_eq!(product_stock(&app, &supplier.owner, supplier.id, product_id).await, 0);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn orders_require_an_accepted_link() {
    let (app, _pool) = db_app().await;
    let supplier = setup_supplier(&app).await;
    let consumer = setup_consumer(&app).await;
    let product_id = create_product(&app, &supplier, 10, 1).await;

    let (status, err) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(consumer.token.as_str()),
        Some(order_body(supplier.id, &[(product_id, 1)])),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{err}");
    assert_eq!(err["kind"], "FORBIDDEN");

    let (status, err) = send(
        &app,
        Method::GET,
        &format!("/api/products?supplier_id={}", supplier.id),
        Some(consumer.token.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{err}");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_link_requests_are_rejected() {
    let (app, _pool) = db_app().await;
    let supplier = setup_supplier(&app).await;
    let consumer = setup_consumer(&app).await;
    let link_id = accepted_link(&app, &supplier, &consumer).await;

    let request = json!({ "supplierId": supplier.id });
    let (status, err) = send(&app, Method::POST, "/api/links", Some(consumer.token.as_str()), Some(request.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT, "{err}");
    assert_eq!(err["kind"], "DUPLICATE_LINK");

    // Bloqueado continua ocupando o par
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/links/{link_id}/status"),
        Some(supplier.owner.as_str()),
        Some(json!({ "status": "blocked" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, err) = send(&app, Method::POST, "/api/links", Some(consumer.token.as_str()), Some(request)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["kind"], "DUPLICATE_LINK");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn complaint_escalation_needs_management_to_resolve() {
    let (app, _pool) = db_app().await;
    let supplier = setup_supplier(&app).await;
    let consumer = setup_consumer(&app).await;
    accepted_link(&app, &supplier, &consumer).await;
    let product_id = create_product(&app, &supplier, 10, 1).await;

    let (_, order) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(consumer.token.as_str()),
        Some(order_body(supplier.id, &[(product_id, 1)])),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();

    let (status, complaint) = send(
        &app,
        Method::POST,
        "/api/complaints",
        Some(consumer.token.as_str()),
        Some(json!({ "orderId": order_id, "description": "Damaged package" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{complaint}");
    assert_eq!(complaint["status"], "open");
    let complaint_uri = format!("/api/complaints/{}", complaint["id"].as_i64().unwrap());

    // open -> resolved não existe
    let (status, err) = send(
        &app,
        Method::POST,
        &format!("{complaint_uri}/status"),
        Some(supplier.sales.as_str()),
        Some(json!({ "status": "resolved" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{err}");
    assert_eq!(err["kind"], "INVALID_TRANSITION");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("{complaint_uri}/status"),
        Some(supplier.sales.as_str()),
        Some(json!({ "status": "in_progress" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, escalated) = send(&app, Method::POST, &format!("{complaint_uri}/escalate"), Some(supplier.sales.as_str()), None).await;
    assert_eq!(status, StatusCode::OK, "{escalated}");
    assert_eq!(escalated["status"], "escalated");

    let (status, err) = send(
        &app,
        Method::POST,
        &format!("{complaint_uri}/status"),
        Some(supplier.sales.as_str()),
        Some(json!({ "status": "resolved", "resolution": "Refunded" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{err}");
    assert_eq!(err["kind"], "FORBIDDEN");

    let (status, resolved) = send(
        &app,
        Method::POST,
        &format!("{complaint_uri}/status"),
        Some(supplier.owner.as_str()),
        Some(json!({ "status": "resolved", "resolution": "Refunded" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{resolved}");
    assert_eq!(resolved["status"], "resolved");
    assert_eq!(resolved["resolution"], "Refunded");

    let (status, incidents) = send(&app, Method::GET, "/api/incidents/my", Some(supplier.manager.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    let incident = incidents
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["complaintId"] == resolved["id"])
        .cloned()
        .unwrap();
    assert_eq!(incident["status"], "resolved");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn login_platform_gate_refuses_management_on_mobile() {
    let (app, _pool) = db_app().await;
    let (owner, _, owner_email) = register_and_login(&app, "owner").await;
    let (status, _) = send(&app, Method::POST, "/api/suppliers", Some(owner.as_str()), Some(json!({ "name": "Atacado Sul" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, err) = send(
        &app,
        Method::POST,
        "/api/auth/login?platform=mobile",
        None,
        Some(json!({ "email": owner_email, "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "{err}");
    assert_eq!(err["kind"], "INVALID_CREDENTIALS");

    let (_, body) = login(&app, &owner_email, Some("web")).await;
    assert_eq!(body["user"]["mainRole"], "SUPPLIER_OWNER");
}

async fn place_order(app: &Router, consumer: &Consumer, supplier: &Supplier, items: &[(i64, i32)]) -> i64 {
    let (status, order) = send(
        app,
        Method::POST,
        "/api/orders",
        Some(consumer.token.as_str()),
        Some(order_body(supplier.id, items)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{order}");
    order["id"].as_i64().unwrap()
}

async fn set_order_status(app: &Router, token: &str, order_id: i64, new_status: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        &format!("/api/orders/{order_id}/status"),
        Some(token),
        Some(json!({ "newStatus": new_status })),
    )
    .await
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn rejecting_and_cancelling_give_the_stock_back() {
    let (app, _pool) = db_app().await;
    let supplier = setup_supplier(&app).await;
    let consumer = setup_consumer(&app).await;
    accepted_link(&app, &supplier, &consumer).await;
    let product_id = create_product(&app, &supplier, 20, 1).await;

    // pending -> rejected
    let rejected = place_order(&app, &consumer, &supplier, &[(product_id, 4)]).await;
    assert_eq!(product_stock(&app, &supplier.owner, supplier.id, product_id).await, 16);
    let (status, body) = set_order_status(&app, &supplier.manager, rejected, "rejected").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "rejected");
    assert_eq!(product_stock(&app, &supplier.owner, supplier.id, product_id).await, 20);

    // accepted -> cancelled pelo fornecedor
    let by_owner = place_order(&app, &consumer, &supplier, &[(product_id, 5)]).await;
    let (status, _) = set_order_status(&app, &supplier.owner, by_owner, "accepted").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product_stock(&app, &supplier.owner, supplier.id, product_id).await, 15);
    let (status, body) = set_order_status(&app, &supplier.owner, by_owner, "cancelled").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "cancelled");
    assert_eq!(product_stock(&app, &supplier.owner, supplier.id, product_id).await, 20);

    // accepted -> cancelled pelo consumidor
    let by_consumer = place_order(&app, &consumer, &supplier, &[(product_id, 6)]).await;
    let (status, _) = set_order_status(&app, &supplier.owner, by_consumer, "accepted").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product_stock(&app, &supplier.owner, supplier.id, product_id).await, 14);
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/orders/{by_consumer}/cancel"),
        Some(consumer.token.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "cancelled");
    assert_eq!(product_stock(&app, &supplier.owner, supplier.id, product_id).await, 20);

    // Estado terminal não devolve duas vezes
    let (status, err) = set_order_status(&app, &supplier.owner, by_consumer, "cancelled").await;
    assert_eq!(status, StatusCode::CONFLICT, "{err}");
    assert_eq!(err["kind"], "INVALID_TRANSITION");
    assert_eq!(product_stock(&app, &supplier.owner, supplier.id, product_id).await, 20);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn restoring_stock_locks_products_in_id_order() {
    let (app, pool) = db_app().await;
    let supplier = setup_supplier(&app).await;
    let consumer = setup_consumer(&app).await;
    accepted_link(&app, &supplier, &consumer).await;
    let low = create_product(&app, &supplier, 10, 1).await;
    let high = create_product(&app, &supplier, 10, 1).await;
    assert!(low < high);

    // Itens gravados com o id maior primeiro
    let order_id = place_order(&app, &consumer, &supplier, &[(high, 2), (low, 3)]).await;

    // Outra transação segura `low` e depois pede `high`, na ordem crescente
    let mut tx = pool.begin().await.unwrap();
    sqlx::query("SELECT id FROM products WHERE id = $1 FOR UPDATE")
        .bind(low)
        .execute(&mut *tx)
        .await
        .unwrap();

    let reject = {
        let app = app.clone();
        let token = supplier.owner.clone();
        tokio::spawn(async move { set_order_status(&app, &token, order_id, "rejected").await })
    };
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;

    sqlx::query("SELECT id FROM products WHERE id = $1 FOR UPDATE")
        .bind(high)
        .execute(&mut *tx)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let (status, body) = reject.await.unwrap();
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "rejected");
    assert_eq!(product_stock(&app, &supplier.owner, supplier.id, low).await, 10);
    assert_eq!(product_stock(&app, &supplier.owner, supplier.id, high).await, 10);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn concurrent_status_change_reports_stale_state() {
    let (app, pool) = db_app().await;
    let supplier = setup_supplier(&app).await;
    let consumer = setup_consumer(&app).await;
    accepted_link(&app, &supplier, &consumer).await;
    let product_id = create_product(&app, &supplier, 10, 1).await;
    let order_id = place_order(&app, &consumer, &supplier, &[(product_id, 2)]).await;

    let mut tx = pool.begin().await.unwrap();
    sqlx::query("SELECT id FROM orders WHERE id = $1 FOR UPDATE")
        .bind(order_id)
        .execute(&mut *tx)
        .await
        .unwrap();

    // O aceite lê `pending` e fica esperando a linha
    let accept = {
        let app = app.clone();
        let token = supplier.owner.clone();
        tokio::spawn(async move { set_order_status(&app, &token, order_id, "accepted").await })
    };
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;

    sqlx::query("UPDATE orders SET status = 'rejected' WHERE id = $1")
        .bind(order_id)
        .execute(&mut *tx)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let (status, err) = accept.await.unwrap();
    assert_eq!(status, StatusCode::CONFLICT, "{err}");
    assert_eq!(err["kind"], "STALE_STATE");

    let (status, order) = send(&app, Method::GET, &format!("/api/orders/{order_id}"), Some(consumer.token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "rejected");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn reorder_of_a_deleted_product_is_refused() {
    let (app, _pool) = db_app().await;
    let supplier = setup_supplier(&app).await;
    let consumer = setup_consumer(&app).await;
    accepted_link(&app, &supplier, &consumer).await;
    let product_id = create_product(&app, &supplier, 10, 1).await;
    let order_id = place_order(&app, &consumer, &supplier, &[(product_id, 2)]).await;
    let (status, _) = set_order_status(&app, &supplier.owner, order_id, "accepted").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/suppliers/{}/products/{product_id}", supplier.id),
        Some(supplier.owner.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, err) = send(
        &app,
        Method::POST,
        &format!("/api/orders/{order_id}/reorder"),
        Some(consumer.token.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{err}");
    assert_eq!(err["kind"], "PRODUCT_NOT_FOUND");
    assert_eq!(err["productId"].as_i64(), Some(product_id));
    assert_eq!(my_orders(&app, &consumer.token).await.len(), 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn removed_link_frees_the_pair_for_a_new_request() {
    let (app, _pool) = db_app().await;
    let supplier = setup_supplier(&app).await;
    let consumer = setup_consumer(&app).await;
    let link_id = accepted_link(&app, &supplier, &consumer).await;

    let (status, removed) = send(
        &app,
        Method::POST,
        &format!("/api/links/{link_id}/status"),
        Some(consumer.token.as_str()),
        Some(json!({ "status": "removed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{removed}");
    assert_eq!(removed["status"], "removed");

    let (status, link) = send(
        &app,
        Method::POST,
        "/api/links",
        Some(consumer.token.as_str()),
        Some(json!({ "supplierId": supplier.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{link}");
    assert_eq!(link["status"], "pending");
    assert_ne!(link["id"].as_i64(), Some(link_id));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn outsiders_cannot_tell_links_apart_from_missing_ones() {
    let (app, _pool) = db_app().await;
    let supplier = setup_supplier(&app).await;
    let consumer = setup_consumer(&app).await;
    let stranger = setup_consumer(&app).await;
    let link_id = accepted_link(&app, &supplier, &consumer).await;

    let (status, existing) = send(
        &app,
        Method::POST,
        &format!("/api/links/{link_id}/status"),
        Some(stranger.token.as_str()),
        Some(json!({ "status": "removed" })),
    )
    .await;
    let (missing_status, missing) = send(
        &app,
        Method::POST,
        &format!("/api/links/{}/status", i64::MAX),
        Some(stranger.token.as_str()),
        Some(json!({ "status": "removed" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND, "{existing}");
    assert_eq!(existing["kind"], "NOT_FOUND");
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(existing, missing);
}
