pub mod auth;
pub mod chat;
pub mod complaint;
pub mod link;
pub mod order;
pub mod product;
pub mod supplier;
