use crate::config::ClientConfig;
use crate::domain::ports::CallingConvention;
use crate::utils::error::{InsightsError, Result};
use crate::utils::validation::{validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 部署用設定檔
///
/// ```toml
/// [client]
/// base_url = "${PATHLET_API_URL}"
/// convention = "aggregate"
/// validate_responses = true
/// validate_requests = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub client: ClientSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSection {
    pub base_url: Option<String>,
    pub convention: Option<CallingConvention>,
    pub validate_responses: Option<bool>,
    pub validate_requests: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InsightsError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, |name| std::env::var(name).ok())
    }

    /// Same as `from_toml_str`, resolving `${VAR}` through `lookup`.
    pub fn from_toml_str_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let processed_content = Self::substitute_vars(content, lookup)?;

        toml::from_str(&processed_content).map_err(|e| InsightsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換變數 (例如 ${PATHLET_API_URL})，找不到的變數保留原樣
    fn substitute_vars<F>(content: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InsightsError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Layers the file's values over `base`; unset keys keep the base value.
    pub fn apply_to(&self, base: ClientConfig) -> ClientConfig {
        ClientConfig {
            base_url: self.client.base_url.clone().unwrap_or(base.base_url),
            convention: self.client.convention.unwrap_or(base.convention),
            validate_responses: self
                .client
                .validate_responses
                .unwrap_or(base.validate_responses),
            validate_requests: self
                .client
                .validate_requests
                .unwrap_or(base.validate_requests),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.client.base_url {
            validate_url("client.base_url", base_url)?;
        }
        Ok(())
    }
}
