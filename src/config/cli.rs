use crate::config::toml_config::TomlConfig;
use crate::config::ClientConfig;
use crate::domain::model::{BirthData, InsightKind, ZodiacSign};
use crate::domain::ports::CallingConvention;
use crate::utils::error::{InsightsError, Result};
use crate::utils::validation::Validate;
use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insight(InsightKind),
    Health,
}

impl FromStr for Command {
    type Err = InsightsError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("health") {
            return Ok(Command::Health);
        }
        s.parse().map(Command::Insight)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Insight(kind) => kind.fmt(f),
            Command::Health => f.write_str("health"),
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "pathlet")]
#[command(about = "Query the Pathlet birth-data insights service")]
pub struct CliConfig {
    /// ascendant, numerology, human-design, compatibility, all or health
    pub command: Command,

    #[arg(long, help = "Birth date (YYYY-MM-DD)")]
    pub birth_date: Option<String>,

    #[arg(long, help = "Birth time (HH:MM or HH:MM AM/PM)")]
    pub birth_time: Option<String>,

    #[arg(long, help = "Birth place, e.g. \"Paris, France\"")]
    pub birth_location: Option<String>,

    #[arg(long, help = "Second person's birth date, for compatibility")]
    pub partner_date: Option<String>,

    #[arg(long)]
    pub partner_time: Option<String>,

    #[arg(long)]
    pub partner_location: Option<String>,

    #[arg(long, help = "Chosen ascendant sign, sent with `all`")]
    pub ascendant: Option<ZodiacSign>,

    #[arg(long, help = "TOML file with a [client] section")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override the service base URL")]
    pub base_url: Option<String>,

    #[arg(long, help = "discrete or aggregate")]
    pub convention: Option<CallingConvention>,

    #[arg(long, help = "Fail when a response does not match its expected shape")]
    pub validate_responses: bool,

    #[arg(long, help = "Check date, time and location formats before sending")]
    pub validate_requests: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 依序套用：環境變數、設定檔、命令列參數
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_env();

        if let Some(path) = &self.config {
            tracing::debug!("Loading client config from {}", path.display());
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            config = file.apply_to(config);
        }

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(convention) = self.convention {
            config.convention = convention;
        }
        if self.validate_responses {
            config.validate_responses = true;
        }
        if self.validate_requests {
            config.validate_requests = true;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn birth_data(&self) -> Result<BirthData> {
        let birth_date = self.birth_date.clone().ok_or_else(|| {
            InsightsError::validation("birth_date", "", "--birth-date is required")
        })?;
        Ok(BirthData {
            birth_date,
            birth_time: self.birth_time.clone(),
            birth_location: self.birth_location.clone(),
        })
    }

    pub fn partner(&self) -> Option<BirthData> {
        self.partner_date.clone().map(|birth_date| BirthData {
            birth_date,
            birth_time: self.partner_time.clone(),
            birth_location: self.partner_location.clone(),
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let kind = match self.command {
            Command::Health => return Ok(()),
            Command::Insight(kind) => kind,
        };

        let check = |birth: &BirthData| {
            if self.validate_requests {
                birth.validate()
            } else {
                birth.check_required()
            }
        };

        check(&self.birth_data()?)?;

        if kind == InsightKind::Compatibility {
            let partner = self.partner().ok_or_else(|| {
                InsightsError::validation("partner_date", "", "--partner-date is required for compatibility")
            })?;
            check(&partner)?;
        }

        if let Some(sign) = self.ascendant {
            if kind != InsightKind::All {
                return Err(InsightsError::validation(
                    "ascendant",
                    sign.name(),
                    "--ascendant is only used with `all`",
                ));
            }
        }

        Ok(())
    }
}
