pub mod auth;
pub mod chat_service;
pub mod complaint_service;
pub mod link_service;
pub mod order_service;
pub mod product_service;
pub mod supplier_service;
