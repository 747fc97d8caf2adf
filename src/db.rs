pub mod user_repo;
pub use user_repo::UserRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
pub mod consumer_repo;
pub use consumer_repo::ConsumerRepository;
pub mod link_repo;
pub use link_repo::LinkRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod complaint_repo;
pub use complaint_repo::ComplaintRepository;
pub mod chat_repo;
pub use chat_repo::ChatRepository;
