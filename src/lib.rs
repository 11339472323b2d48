pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::ShopConfig;

pub use crate::adapters::{Database, DatabaseConfig, TerminalConsole};
pub use crate::core::menu::MechanicShop;
pub use crate::utils::error::{Result, ShopError};
