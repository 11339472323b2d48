// Adapters layer: concrete implementations of the domain ports (store, terminal).

pub mod console;
pub mod sqlite_store;

pub use console::TerminalConsole;
pub use sqlite_store::{Database, DatabaseConfig, SqliteRepo};
