use crate::domain::insight::{Insight, InsightResult};
use crate::domain::model::{
    AggregateResult, AscendantResult, BirthData, CompatibilityResult, HumanDesignResult,
    InsightKind, NumerologyResult,
};
use crate::utils::error::{InsightsError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Which backend contract a deployment talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallingConvention {
    /// 每種計算一個端點
    #[default]
    Discrete,
    /// 單一 `/calculate_all` 端點
    Aggregate,
}

impl CallingConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallingConvention::Discrete => "discrete",
            CallingConvention::Aggregate => "aggregate",
        }
    }
}

impl std::fmt::Display for CallingConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CallingConvention {
    type Err = InsightsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discrete" => Ok(CallingConvention::Discrete),
            "aggregate" => Ok(CallingConvention::Aggregate),
            _ => Err(InsightsError::validation(
                "convention",
                s,
                "Expected `discrete` or `aggregate`",
            )),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn convention(&self) -> CallingConvention;
    fn validate_responses(&self) -> bool;
    fn validate_requests(&self) -> bool;
}

#[async_trait]
pub trait InsightsApi: Send + Sync {
    async fn get_ascendant(&self, birth: &BirthData) -> Result<Insight<AscendantResult>>;
    async fn calculate_numerology(&self, birth: &BirthData) -> Result<Insight<NumerologyResult>>;
    async fn calculate_human_design(
        &self,
        birth: &BirthData,
    ) -> Result<Insight<HumanDesignResult>>;
    async fn calculate_compatibility(
        &self,
        person1: &BirthData,
        person2: &BirthData,
    ) -> Result<Insight<CompatibilityResult>>;
    async fn calculate_all(&self, birth: &BirthData) -> Result<Insight<AggregateResult>>;

    /// 依使用者選擇的類別發出對應的單一請求
    async fn fetch(
        &self,
        kind: InsightKind,
        birth: &BirthData,
        partner: Option<&BirthData>,
    ) -> Result<InsightResult> {
        let result = match kind {
            InsightKind::Ascendant => InsightResult::Ascendant(self.get_ascendant(birth).await?),
            InsightKind::Numerology => {
                InsightResult::Numerology(self.calculate_numerology(birth).await?)
            }
            InsightKind::HumanDesign => {
                InsightResult::HumanDesign(self.calculate_human_design(birth).await?)
            }
            InsightKind::Compatibility => {
                let partner = partner.ok_or_else(|| {
                    InsightsError::validation(
                        "person2",
                        "",
                        "Compatibility needs a second birth profile",
                    )
                })?;
                InsightResult::Compatibility(self.calculate_compatibility(birth, partner).await?)
            }
            InsightKind::All => InsightResult::Aggregate(self.calculate_all(birth).await?),
        };
        Ok(result)
    }
}
