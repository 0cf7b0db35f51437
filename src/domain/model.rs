use crate::utils::error::{InsightsError, Result};
use crate::utils::validation::{
    validate_birth_date, validate_birth_location, validate_birth_time, validate_non_empty_string,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 一次查詢用的出生資料，選填欄位在請求中會被省略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthData {
    pub birth_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_location: Option<String>,
}

impl BirthData {
    pub fn new(birth_date: impl Into<String>) -> Self {
        Self {
            birth_date: birth_date.into(),
            birth_time: None,
            birth_location: None,
        }
    }

    pub fn with_time(mut self, birth_time: impl Into<String>) -> Self {
        self.birth_time = Some(birth_time.into());
        self
    }

    pub fn with_location(mut self, birth_location: impl Into<String>) -> Self {
        self.birth_location = Some(birth_location.into());
        self
    }

    /// 只確認必填的出生日期存在，其餘內容交給後端判斷
    pub fn check_required(&self) -> Result<()> {
        validate_non_empty_string("birth_date", &self.birth_date)
    }
}

impl Validate for BirthData {
    fn validate(&self) -> Result<()> {
        validate_birth_date("birth_date", &self.birth_date)?;
        if let Some(time) = &self.birth_time {
            validate_birth_time("birth_time", time)?;
        }
        if let Some(location) = &self.birth_location {
            validate_birth_location("birth_location", location)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightKind {
    Ascendant,
    Numerology,
    HumanDesign,
    Compatibility,
    All,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Ascendant => "ascendant",
            InsightKind::Numerology => "numerology",
            InsightKind::HumanDesign => "human-design",
            InsightKind::Compatibility => "compatibility",
            InsightKind::All => "all",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = InsightsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "ascendant" | "ascendants" => Ok(InsightKind::Ascendant),
            "numerology" => Ok(InsightKind::Numerology),
            "human-design" | "humandesign" => Ok(InsightKind::HumanDesign),
            "compatibility" => Ok(InsightKind::Compatibility),
            "all" => Ok(InsightKind::All),
            _ => Err(InsightsError::validation(
                "insight",
                s,
                "Expected ascendant, numerology, human-design, compatibility or all",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// 後端在沒有出生時間、但使用者選了上升星座時，用來估計出生時段
    pub fn birth_time_window(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "04:00 AM - 06:00 AM",
            ZodiacSign::Taurus => "06:00 AM - 08:00 AM",
            ZodiacSign::Gemini => "08:00 AM - 10:00 AM",
            ZodiacSign::Cancer => "10:00 AM - 12:00 PM",
            ZodiacSign::Leo => "12:00 PM - 02:00 PM",
            ZodiacSign::Virgo => "02:00 PM - 04:00 PM",
            ZodiacSign::Libra => "04:00 PM - 06:00 PM",
            ZodiacSign::Scorpio => "06:00 PM - 08:00 PM",
            ZodiacSign::Sagittarius => "08:00 PM - 10:00 PM",
            ZodiacSign::Capricorn => "10:00 PM - 12:00 AM",
            ZodiacSign::Aquarius => "12:00 AM - 02:00 AM",
            ZodiacSign::Pisces => "02:00 AM - 04:00 AM",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZodiacSign {
    type Err = InsightsError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        ZodiacSign::ALL
            .iter()
            .copied()
            .find(|sign| sign.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InsightsError::validation("ascendant", s, "Unknown zodiac sign"))
    }
}

// ---- request bodies ----

#[derive(Debug, Serialize)]
pub struct AscendantRequest<'a> {
    pub birth_date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_location: Option<&'a str>,
}

impl<'a> From<&'a BirthData> for AscendantRequest<'a> {
    fn from(birth: &'a BirthData) -> Self {
        Self {
            birth_date: &birth.birth_date,
            birth_location: birth.birth_location.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NumerologyRequest<'a> {
    pub birth_date: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CompatibilityRequest<'a> {
    pub person1: &'a BirthData,
    pub person2: &'a BirthData,
}

#[derive(Debug, Serialize)]
pub struct AggregateRequest<'a> {
    #[serde(flatten)]
    pub birth: &'a BirthData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_ascendant: Option<ZodiacSign>,
}

// ---- typed views over backend payloads ----

/// 可由原始 JSON 轉成型別化結果的回應
pub trait InsightPayload: serde::de::DeserializeOwned {
    const KIND: InsightKind;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AscendantResult {
    #[serde(alias = "possible_ascendants")]
    pub possible_signs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InsightPayload for AscendantResult {
    const KIND: InsightKind = InsightKind::Ascendant;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumerologyResult {
    pub life_path_number: i64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunities: Option<Vec<String>>,
}

impl InsightPayload for NumerologyResult {
    const KIND: InsightKind = InsightKind::Numerology;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanDesignResult {
    #[serde(rename = "type")]
    pub design_type: String,
    pub strategy: String,
    pub authority: String,
    pub profile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InsightPayload for HumanDesignResult {
    const KIND: InsightKind = InsightKind::HumanDesign;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub compatibility_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<Vec<String>>,
}

impl InsightPayload for CompatibilityResult {
    const KIND: InsightKind = InsightKind::Compatibility;
}

/// 聚合端點的回應，各成員保持不透明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    #[serde(default)]
    pub numerology: Option<serde_json::Value>,
    #[serde(default)]
    pub human_design: Option<serde_json::Value>,
    #[serde(default)]
    pub ascendant: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,
}

impl InsightPayload for AggregateResult {
    const KIND: InsightKind = InsightKind::All;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_birth_data_omits_missing_fields() {
        let birth = BirthData::new("2000-01-01");
        let value = serde_json::to_value(&birth).unwrap();
        assert_eq!(value, json!({"birth_date": "2000-01-01"}));
    }

    #[test]
    fn test_birth_data_validation() {
        let valid = BirthData::new("1990-05-15")
            .with_time("14:30")
            .with_location("Paris, France");
        assert!(valid.validate().is_ok());

        assert!(BirthData::new("1990-13-01").validate().is_err());
        assert!(BirthData::new("1990-05-15")
            .with_time("half past two")
            .validate()
            .is_err());
        assert!(BirthData::new("1990-05-15")
            .with_location("NY")
            .validate()
            .is_err());
    }

    #[test]
    fn test_required_check_accepts_short_location() {
        let birth = BirthData::new("1990-05-15").with_location("NY").with_time("noon");
        assert!(birth.check_required().is_ok());
        assert!(BirthData::new(" ").check_required().is_err());
    }

    #[test]
    fn test_ascendant_request_only_carries_date_and_location() {
        let birth = BirthData::new("1990-05-15")
            .with_time("14:30")
            .with_location("Paris, France");
        let value = serde_json::to_value(AscendantRequest::from(&birth)).unwrap();
        assert_eq!(
            value,
            json!({"birth_date": "1990-05-15", "birth_location": "Paris, France"})
        );
    }

    #[test]
    fn test_aggregate_request_flattens_birth_data() {
        let birth = BirthData::new("2000-01-01").with_location("Lisbon");
        let request = AggregateRequest {
            birth: &birth,
            selected_ascendant: Some(ZodiacSign::Leo),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "birth_date": "2000-01-01",
                "birth_location": "Lisbon",
                "selected_ascendant": "Leo"
            })
        );
    }

    #[test]
    fn test_insight_kind_parsing() {
        assert_eq!("human_design".parse::<InsightKind>().unwrap(), InsightKind::HumanDesign);
        assert_eq!("Ascendants".parse::<InsightKind>().unwrap(), InsightKind::Ascendant);
        assert_eq!("ALL".parse::<InsightKind>().unwrap(), InsightKind::All);
        assert!("tarot".parse::<InsightKind>().is_err());
    }

    #[test]
    fn test_zodiac_sign_parsing_and_windows() {
        assert_eq!("scorpio".parse::<ZodiacSign>().unwrap(), ZodiacSign::Scorpio);
        assert!("Ophiuchus".parse::<ZodiacSign>().is_err());
        assert_eq!(ZodiacSign::Aries.birth_time_window(), "04:00 AM - 06:00 AM");
        assert_eq!(ZodiacSign::Pisces.birth_time_window(), "02:00 AM - 04:00 AM");
    }

    #[test]
    fn test_ascendant_result_accepts_backend_field_name() {
        let parsed: AscendantResult = serde_json::from_value(json!({
            "possible_ascendants": ["Leo", "Virgo"],
            "instructions": "Pick one"
        }))
        .unwrap();
        assert_eq!(parsed.possible_signs, vec!["Leo", "Virgo"]);
        assert_eq!(parsed.instructions.as_deref(), Some("Pick one"));
    }
}
