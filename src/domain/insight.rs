use crate::domain::model::{
    AggregateResult, AscendantResult, CompatibilityResult, HumanDesignResult, InsightKind,
    InsightPayload, NumerologyResult,
};
use crate::utils::error::{InsightsError, Result};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::marker::PhantomData;

/// 後端回傳的原始 JSON，連同它應有的型別
///
/// The body is kept exactly as received. `parse` gives the typed view and
/// turns shape drift into a [`InsightsError::SchemaError`].
#[derive(Debug, Clone)]
pub struct Insight<T> {
    raw: Value,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Insight<T> {
    pub fn from_raw(raw: Value) -> Self {
        Self {
            raw,
            _payload: PhantomData,
        }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}

impl<T: InsightPayload> Insight<T> {
    pub fn parse(&self) -> Result<T> {
        serde_json::from_value(self.raw.clone()).map_err(|e| InsightsError::SchemaError {
            kind: T::KIND.to_string(),
            message: e.to_string(),
        })
    }
}

impl<T> PartialEq for Insight<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Serialize for Insight<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// 依類別標記的查詢結果
#[derive(Debug, Clone, PartialEq)]
pub enum InsightResult {
    Ascendant(Insight<AscendantResult>),
    Numerology(Insight<NumerologyResult>),
    HumanDesign(Insight<HumanDesignResult>),
    Compatibility(Insight<CompatibilityResult>),
    Aggregate(Insight<AggregateResult>),
}

impl InsightResult {
    pub fn kind(&self) -> InsightKind {
        match self {
            InsightResult::Ascendant(_) => InsightKind::Ascendant,
            InsightResult::Numerology(_) => InsightKind::Numerology,
            InsightResult::HumanDesign(_) => InsightKind::HumanDesign,
            InsightResult::Compatibility(_) => InsightKind::Compatibility,
            InsightResult::Aggregate(_) => InsightKind::All,
        }
    }

    pub fn raw(&self) -> &Value {
        match self {
            InsightResult::Ascendant(insight) => insight.raw(),
            InsightResult::Numerology(insight) => insight.raw(),
            InsightResult::HumanDesign(insight) => insight.raw(),
            InsightResult::Compatibility(insight) => insight.raw(),
            InsightResult::Aggregate(insight) => insight.raw(),
        }
    }

    pub fn into_raw(self) -> Value {
        match self {
            InsightResult::Ascendant(insight) => insight.into_raw(),
            InsightResult::Numerology(insight) => insight.into_raw(),
            InsightResult::HumanDesign(insight) => insight.into_raw(),
            InsightResult::Compatibility(insight) => insight.into_raw(),
            InsightResult::Aggregate(insight) => insight.into_raw(),
        }
    }

    /// Checks the payload against its typed view without changing it.
    pub fn validate(&self) -> Result<()> {
        match self {
            InsightResult::Ascendant(insight) => insight.parse().map(|_| ()),
            InsightResult::Numerology(insight) => insight.parse().map(|_| ()),
            InsightResult::HumanDesign(insight) => insight.parse().map(|_| ()),
            InsightResult::Compatibility(insight) => insight.parse().map(|_| ()),
            InsightResult::Aggregate(insight) => insight.parse().map(|_| ()),
        }
    }
}

impl Serialize for InsightResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.raw().serialize(serializer)
    }
}
