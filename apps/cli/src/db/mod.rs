//! Local SQLite storage for durable progress.

pub mod schema;
pub mod storage;

pub use storage::SqliteStorage;
