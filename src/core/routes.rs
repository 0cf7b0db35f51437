use crate::domain::model::InsightKind;
use crate::domain::ports::CallingConvention;
use crate::utils::error::{InsightsError, Result};
use reqwest::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    GetAscendants,
    CalculateNumerology,
    CalculateHumanDesign,
    CalculateCompatibility,
    CalculateAll,
    Health,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::GetAscendants => "/get_ascendants",
            Route::CalculateNumerology => "/calculate_numerology",
            Route::CalculateHumanDesign => "/calculate_human_design",
            Route::CalculateCompatibility => "/calculate_compatibility",
            Route::CalculateAll => "/calculate_all",
            Route::Health => "/healthz",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Route::Health => Method::GET,
            _ => Method::POST,
        }
    }
}

/// 一個操作在某種呼叫慣例下對應的端點
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePlan {
    pub route: Route,
    /// Member of the aggregate body that holds the answer, if any.
    pub member: Option<&'static str>,
}

impl RoutePlan {
    fn direct(route: Route) -> Self {
        Self {
            route,
            member: None,
        }
    }

    fn member_of(route: Route, member: &'static str) -> Self {
        Self {
            route,
            member: Some(member),
        }
    }
}

/// Every operation maps to exactly one endpoint of the configured contract.
/// Operations the contract does not offer are refused, never rerouted.
pub fn plan(convention: CallingConvention, kind: InsightKind) -> Result<RoutePlan> {
    use CallingConvention::*;
    use InsightKind::*;

    match (convention, kind) {
        (_, Ascendant) => Ok(RoutePlan::direct(Route::GetAscendants)),
        (Discrete, Numerology) => Ok(RoutePlan::direct(Route::CalculateNumerology)),
        (Discrete, HumanDesign) => Ok(RoutePlan::direct(Route::CalculateHumanDesign)),
        (Discrete, Compatibility) => Ok(RoutePlan::direct(Route::CalculateCompatibility)),
        (Aggregate, Numerology) => Ok(RoutePlan::member_of(Route::CalculateAll, "numerology")),
        (Aggregate, HumanDesign) => Ok(RoutePlan::member_of(Route::CalculateAll, "human_design")),
        (Aggregate, All) => Ok(RoutePlan::direct(Route::CalculateAll)),
        (Discrete, All) | (Aggregate, Compatibility) => Err(InsightsError::UnsupportedOperation {
            operation: kind.to_string(),
            convention: convention.to_string(),
        }),
    }
}
