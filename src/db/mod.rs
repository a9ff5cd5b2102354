// Database module
// SQLite-backed key/value storage for persisted app state

pub mod connection;
pub mod migrations;
pub mod operations;
pub mod store;

pub use connection::DatabaseConnection;
pub use store::SqliteStore;
