pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::TomlConfig;

pub use adapters::{CatalogRepository, LocalStorage, VpicClient};
pub use crate::core::{normalizer::Normalizer, service::VpicService};
pub use utils::error::{DecodeFailure, DecodeFailureReason, LookupError, Result};
