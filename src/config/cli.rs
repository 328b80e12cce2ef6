use crate::config::toml_config::TomlConfig;
use crate::core::EmptyValuePolicy;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "vpic-lookup")]
#[command(about = "Decode VINs and look up vehicle reference data through NHTSA vPIC")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// JSON reference catalog used for years, makes and models
    #[arg(long)]
    pub catalog_path: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// How empty attribute values are reported
    #[arg(long, value_enum)]
    pub empty_values: Option<EmptyValuePolicy>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Decode a VIN
    Vin { vin: String },
    /// List supported model years
    Years,
    /// List makes available in a model year
    Makes {
        #[arg(long)]
        year: i32,
    },
    /// List models for a make and model year
    Models {
        #[arg(long)]
        make_id: i64,
        #[arg(long)]
        year: i32,
    },
}

impl CliConfig {
    /// 載入設定檔 (若有)，再套用命令列覆蓋
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(endpoint) = &self.api_endpoint {
            config.provider.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.provider.timeout_seconds = timeout;
        }
        if let Some(path) = &self.catalog_path {
            config.catalog.path = Some(path.clone());
        }
        if let Some(policy) = self.empty_values {
            config.normalize.empty_values = policy;
        }

        Ok(config)
    }
}
