// src/policy.rs

// Camada pura de autorização e regras de negócio.
// Os serviços carregam o estado e consultam estas funções antes de escrever.
pub mod complaint;
pub mod identity;
pub mod link;
pub mod order;

pub use identity::{ConsumerActor, EffectiveRole, Identity, StaffActor, SupplierMembership};
