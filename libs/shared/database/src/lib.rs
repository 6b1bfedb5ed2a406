pub mod error;
pub mod pool;
pub mod schema;

pub use error::DbError;
pub use pool::{connect, connect_in_memory, Database};
pub use schema::bootstrap;
