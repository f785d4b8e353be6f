/// Database connection and schema migration
pub mod database;

/// Ledger settings loading from config.toml and the environment
pub mod settings;

pub use database::{SCHEMA_VERSION, create_connection, get_database_url, migrate, schema_version};
pub use settings::{DEFAULT_AUTO_SETTLE_THRESHOLD, Settings, load_settings};
