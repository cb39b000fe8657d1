pub mod collaboration;
pub mod errors;
pub mod identifiers;
pub mod person;
pub mod todo;
pub mod token;

pub use collaboration::*;
pub use errors::*;
pub use identifiers::*;
pub use person::*;
pub use todo::*;
pub use token::*;
