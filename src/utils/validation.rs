use crate::utils::error::{InsightsError, Result};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(InsightsError::validation(
            field_name,
            url_str,
            "URL cannot be empty",
        ));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(InsightsError::validation(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(InsightsError::validation(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InsightsError::validation(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// 出生日期必須是 YYYY-MM-DD
pub fn validate_birth_date(field_name: &str, value: &str) -> Result<()> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| InsightsError::validation(field_name, value, "Use YYYY-MM-DD format"))
}

fn time_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"^(0[1-9]|1[0-2]):[0-5][0-9] (AM|PM)$",
            r"^([01][0-9]|2[0-3]):[0-5][0-9]$",
            r"^([01][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9]$",
        ]
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
    })
}

/// 接受 HH:MM、HH:MM:SS 與 HH:MM AM/PM，其餘格式再交給 chrono 寬鬆解析
pub fn validate_birth_time(field_name: &str, value: &str) -> Result<()> {
    let value = value.trim();
    if time_patterns().iter().any(|re| re.is_match(value)) {
        return Ok(());
    }

    let lenient = NaiveTime::parse_from_str(value, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"));
    lenient.map(|_| ()).map_err(|_| {
        InsightsError::validation(field_name, value, "Invalid birth time format. Use HH:MM, HH:MM AM/PM")
    })
}

pub fn validate_birth_location(field_name: &str, value: &str) -> Result<()> {
    if value.trim().chars().count() <= 2 {
        return Err(InsightsError::validation(
            field_name,
            value,
            "Location must be longer than two characters",
        ));
    }
    Ok(())
}
