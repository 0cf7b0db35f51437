pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::{toml_config::TomlConfig, ClientConfig};
pub use crate::core::client::InsightsClient;
pub use crate::domain::insight::{Insight, InsightResult};
pub use crate::domain::model::{
    AggregateResult, AscendantResult, BirthData, CompatibilityResult, HealthStatus,
    HumanDesignResult, InsightKind, NumerologyResult, ZodiacSign,
};
pub use crate::domain::ports::{CallingConvention, ConfigProvider, InsightsApi};
pub use crate::utils::error::{InsightsError, Result};
