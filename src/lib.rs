// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

/// Monta o router completo da API.
pub fn app(app_state: AppState) -> Router {
    // Rotas públicas
    let public_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/suppliers", get(handlers::supplier::list_suppliers));

    // Rotas protegidas pelo middleware de autenticação
    let protected_routes = Router::new()
        .route("/users/me", get(handlers::auth::get_me))
        // Fornecedores e equipe
        .route("/suppliers", post(handlers::supplier::create_supplier))
        .route("/suppliers/my", get(handlers::supplier::list_my_suppliers))
        .route("/suppliers/{id}", delete(handlers::supplier::deactivate_supplier))
        .route(
            "/suppliers/{id}/staff",
            post(handlers::supplier::add_staff).get(handlers::supplier::list_staff),
        )
        .route(
            "/suppliers/{id}/staff/{user_id}",
            delete(handlers::supplier::remove_staff),
        )
        // Catálogo
        .route("/suppliers/{id}/products", post(handlers::product::create_product))
        .route(
            "/suppliers/{id}/products/{product_id}",
            put(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        )
        .route("/products", get(handlers::product::list_products))
        // Consumidores
        .route("/consumers", post(handlers::supplier::create_consumer))
        .route("/consumers/me", get(handlers::supplier::get_my_consumer))
        // Vínculos
        .route("/links", post(handlers::link::request_link))
        .route("/links/my", get(handlers::link::list_my_links))
        .route("/links/{id}/status", post(handlers::link::update_link_status))
        // Pedidos
        .route("/orders", post(handlers::order::create_order))
        .route("/orders/my", get(handlers::order::list_my_orders))
        .route("/orders/{id}", get(handlers::order::get_order))
        .route("/orders/{id}/status", post(handlers::order::update_order_status))
        .route("/orders/{id}/cancel", post(handlers::order::cancel_order))
        .route("/orders/{id}/reorder", post(handlers::order::reorder))
        // Reclamações e ocorrências
        .route("/complaints", post(handlers::complaint::create_complaint))
        .route("/complaints/my", get(handlers::complaint::list_my_complaints))
        .route(
            "/complaints/{id}/status",
            post(handlers::complaint::update_complaint_status),
        )
        .route(
            "/complaints/{id}/escalate",
            post(handlers::complaint::escalate_complaint),
        )
        .route("/incidents/my", get(handlers::complaint::list_my_incidents))
        .route(
            "/incidents/{id}/status",
            post(handlers::complaint::update_incident_status),
        )
        // Chat
        .route("/chat/messages", post(handlers::chat::send_message))
        .route(
            "/chat/threads/{supplier_id}/{consumer_id}",
            get(handlers::chat::get_thread),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", public_routes.merge(protected_routes))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
