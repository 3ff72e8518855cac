pub mod schema;
pub mod connection;
pub mod repositories;
pub mod request;

pub use connection::{Database, DbConnection, DbPool, PoolOptions};
pub use request::DbConn;
