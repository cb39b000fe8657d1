pub mod errors;
pub mod gateways;
pub mod identity;
pub mod memory;
pub mod todo_service;

pub use errors::*;
pub use gateways::*;
pub use identity::*;
pub use todo_service::*;
