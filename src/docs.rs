// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;
use crate::policy;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Suppliers ---
        handlers::supplier::list_suppliers,
        handlers::supplier::create_supplier,
        handlers::supplier::list_my_suppliers,
        handlers::supplier::deactivate_supplier,
        handlers::supplier::add_staff,
        handlers::supplier::list_staff,
        handlers::supplier::remove_staff,

        // --- Consumers ---
        handlers::supplier::create_consumer,
        handlers::supplier::get_my_consumer,

        // --- Links ---
        handlers::link::list_my_links,
        handlers::link::request_link,
        handlers::link::update_link_status,

        // --- Products ---
        handlers::product::list_products,
        handlers::product::create_product,
        handlers::product::update_product,
        handlers::product::delete_product,

        // --- Orders ---
        handlers::order::create_order,
        handlers::order::list_my_orders,
        handlers::order::get_order,
        handlers::order::update_order_status,
        handlers::order::cancel_order,
        handlers::order::reorder,

        // --- Complaints / Incidents ---
        handlers::complaint::create_complaint,
        handlers::complaint::list_my_complaints,
        handlers::complaint::update_complaint_status,
        handlers::complaint::escalate_complaint,
        handlers::complaint::list_my_incidents,
        handlers::complaint::update_incident_status,

        // --- Chat ---
        handlers::chat::send_message,
        handlers::chat::get_thread,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::GlobalRole,
            models::auth::SupplierRole,
            models::auth::StaffMember,
            models::auth::SupplierRoleInfo,
            models::auth::UserOut,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::Platform,
            models::auth::LoginResponse,
            policy::EffectiveRole,

            // --- Suppliers ---
            models::supplier::Supplier,
            models::supplier::Consumer,
            models::supplier::CreateSupplierPayload,
            models::supplier::CreateConsumerPayload,
            models::supplier::AddStaffPayload,

            // --- Links ---
            models::link::LinkStatus,
            models::link::Link,
            models::link::LinkView,
            models::link::CreateLinkPayload,
            models::link::UpdateLinkStatusPayload,

            // --- Products ---
            models::product::DeliveryMethod,
            models::product::Product,
            models::product::ProductPayload,

            // --- Orders ---
            models::order::OrderStatus,
            models::order::Order,
            models::order::OrderItem,
            models::order::OrderResponse,
            models::order::OrderLinePayload,
            models::order::CreateOrderPayload,
            models::order::UpdateOrderStatusPayload,

            // --- Complaints ---
            models::complaint::ComplaintStatus,
            models::complaint::IncidentStatus,
            models::complaint::Complaint,
            models::complaint::Incident,
            models::complaint::CreateComplaintPayload,
            models::complaint::UpdateComplaintStatusPayload,
            models::complaint::UpdateIncidentStatusPayload,

            // --- Chat ---
            models::chat::MessageResponse,
            models::chat::CreateMessagePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Suppliers", description = "Fornecedores e Equipe"),
        (name = "Consumers", description = "Perfil de Consumidor"),
        (name = "Links", description = "Vínculos Fornecedor x Consumidor"),
        (name = "Products", description = "Catálogo de Produtos"),
        (name = "Orders", description = "Pedidos e Estoque"),
        (name = "Complaints", description = "Reclamações"),
        (name = "Incidents", description = "Ocorrências Internas"),
        (name = "Chat", description = "Mensagens entre Fornecedor e Consumidor")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
