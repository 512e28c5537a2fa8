pub mod accounts;
pub mod schema;

pub use accounts::*;
pub use schema::*;
