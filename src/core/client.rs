use crate::core::routes::{plan, Route};
use crate::domain::insight::Insight;
use crate::domain::model::{
    AggregateRequest, AggregateResult, AscendantRequest, AscendantResult, BirthData,
    CompatibilityRequest, CompatibilityResult, HealthStatus, HumanDesignResult, InsightKind,
    InsightPayload, NumerologyRequest, NumerologyResult, ZodiacSign,
};
use crate::domain::ports::{CallingConvention, ConfigProvider, InsightsApi};
use crate::utils::error::{InsightsError, Result};
use crate::utils::validation::{validate_url, Validate};
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// 呼叫遠端 insights 服務的用戶端
///
/// Stateless: every operation is one HTTP exchange, nothing is cached and no
/// call is retried. Failures are logged and handed back unchanged.
#[derive(Debug, Clone)]
pub struct InsightsClient {
    http: Client,
    base_url: Url,
    convention: CallingConvention,
    validate_responses: bool,
    validate_requests: bool,
}

#[derive(Debug, Clone, Copy)]
enum RequestPayload<'a> {
    Birth(&'a BirthData),
    Pair(&'a BirthData, &'a BirthData),
    WithAscendant(&'a BirthData, ZodiacSign),
}

impl RequestPayload<'_> {
    /// Without `strict` only the required birth date is checked; the backend
    /// judges everything else.
    fn check(&self, strict: bool) -> Result<()> {
        let check_one = |birth: &BirthData| {
            if strict {
                birth.validate()
            } else {
                birth.check_required()
            }
        };
        match self {
            RequestPayload::Birth(birth) | RequestPayload::WithAscendant(birth, _) => {
                check_one(birth)
            }
            RequestPayload::Pair(person1, person2) => {
                check_one(person1)?;
                check_one(person2)
            }
        }
    }

    /// 依端點只送出該端點需要的欄位
    fn body_for(&self, route: Route) -> Result<Value> {
        let body = match (*self, route) {
            (RequestPayload::Pair(person1, person2), _) => {
                serde_json::to_value(CompatibilityRequest { person1, person2 })?
            }
            (RequestPayload::WithAscendant(birth, sign), _) => {
                serde_json::to_value(AggregateRequest {
                    birth,
                    selected_ascendant: Some(sign),
                })?
            }
            (RequestPayload::Birth(birth), Route::GetAscendants) => {
                serde_json::to_value(AscendantRequest::from(birth))?
            }
            (RequestPayload::Birth(birth), Route::CalculateNumerology) => {
                serde_json::to_value(NumerologyRequest {
                    birth_date: &birth.birth_date,
                })?
            }
            (RequestPayload::Birth(birth), Route::CalculateAll) => {
                serde_json::to_value(AggregateRequest {
                    birth,
                    selected_ascendant: None,
                })?
            }
            (RequestPayload::Birth(birth), _) => serde_json::to_value(birth)?,
        };
        Ok(body)
    }
}

impl InsightsClient {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("pathlet-insights/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InsightsError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Self::with_http_client(http, config)
    }

    /// Uses a caller-supplied `reqwest::Client`, e.g. one with a transport timeout.
    pub fn with_http_client<C: ConfigProvider + ?Sized>(http: Client, config: &C) -> Result<Self> {
        validate_url("base_url", config.base_url())?;
        let base_url = normalize_base_url(config.base_url())?;

        tracing::debug!(
            "Insights client targets {} ({} endpoints)",
            base_url,
            config.convention()
        );

        Ok(Self {
            http,
            base_url,
            convention: config.convention(),
            validate_responses: config.validate_responses(),
            validate_requests: config.validate_requests(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn convention(&self) -> CallingConvention {
        self.convention
    }

    fn endpoint(&self, route: Route) -> Result<Url> {
        self.base_url
            .join(route.path().trim_start_matches('/'))
            .map_err(|e| InsightsError::ConfigError {
                message: format!("Cannot build URL for {}: {}", route.path(), e),
            })
    }

    async fn send(&self, route: Route, body: Option<&Value>) -> Result<Value> {
        let url = self.endpoint(route)?;
        tracing::debug!("Making API request: {} {}", route.method(), url);

        let mut request = self.http.request(route.method(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| InsightsError::RequestError {
                route: route.path().to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("Could not read error body from {}: {}", route.path(), e);
                    String::new()
                }
            };
            return Err(InsightsError::StatusError {
                route: route.path().to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| InsightsError::RequestError {
                route: route.path().to_string(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|e| InsightsError::DecodeError {
            route: route.path().to_string(),
            message: e.to_string(),
        })
    }

    async fn call<T: InsightPayload>(
        &self,
        kind: InsightKind,
        payload: RequestPayload<'_>,
    ) -> Result<Insight<T>> {
        let outcome = self.execute(kind, payload).await;
        if let Err(e) = &outcome {
            tracing::error!(
                operation = %kind,
                convention = %self.convention,
                category = ?e.category(),
                "❌ Insights request failed: {}",
                e
            );
        }
        outcome
    }

    async fn execute<T: InsightPayload>(
        &self,
        kind: InsightKind,
        payload: RequestPayload<'_>,
    ) -> Result<Insight<T>> {
        let plan = plan(self.convention, kind)?;
        payload.check(self.validate_requests)?;

        let body = payload.body_for(plan.route)?;
        let raw = self.send(plan.route, Some(&body)).await?;
        let raw = match plan.member {
            Some(member) => take_member(raw, member, plan.route)?,
            None => raw,
        };

        let insight = Insight::from_raw(raw);
        if self.validate_responses {
            insight.parse()?;
        }
        Ok(insight)
    }

    /// `calculate_all` with the ascendant the user picked from `get_ascendant`;
    /// the service estimates a birth time from it when none was given.
    pub async fn calculate_all_with_ascendant(
        &self,
        birth: &BirthData,
        ascendant: ZodiacSign,
    ) -> Result<Insight<AggregateResult>> {
        self.call(
            InsightKind::All,
            RequestPayload::WithAscendant(birth, ascendant),
        )
        .await
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let outcome = async {
            let raw = self.send(Route::Health, None).await?;
            serde_json::from_value(raw).map_err(|e| InsightsError::DecodeError {
                route: Route::Health.path().to_string(),
                message: e.to_string(),
            })
        }
        .await;

        if let Err(e) = &outcome {
            tracing::error!("❌ Health check failed: {}", e);
        }
        outcome
    }
}

#[async_trait::async_trait]
impl InsightsApi for InsightsClient {
    async fn get_ascendant(&self, birth: &BirthData) -> Result<Insight<AscendantResult>> {
        self.call(InsightKind::Ascendant, RequestPayload::Birth(birth))
            .await
    }

    async fn calculate_numerology(&self, birth: &BirthData) -> Result<Insight<NumerologyResult>> {
        self.call(InsightKind::Numerology, RequestPayload::Birth(birth))
            .await
    }

    async fn calculate_human_design(
        &self,
        birth: &BirthData,
    ) -> Result<Insight<HumanDesignResult>> {
        self.call(InsightKind::HumanDesign, RequestPayload::Birth(birth))
            .await
    }

    async fn calculate_compatibility(
        &self,
        person1: &BirthData,
        person2: &BirthData,
    ) -> Result<Insight<CompatibilityResult>> {
        self.call(
            InsightKind::Compatibility,
            RequestPayload::Pair(person1, person2),
        )
        .await
    }

    async fn calculate_all(&self, birth: &BirthData) -> Result<Insight<AggregateResult>> {
        self.call(InsightKind::All, RequestPayload::Birth(birth))
            .await
    }
}

/// 確保路徑以 `/` 結尾，`Url::join` 才會保留像 `/api` 這樣的前綴
fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url.trim()).map_err(|e| {
        InsightsError::validation("base_url", base_url, format!("Invalid URL format: {}", e))
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn take_member(raw: Value, member: &str, route: Route) -> Result<Value> {
    match raw {
        Value::Object(mut map) => map.remove(member).ok_or_else(|| InsightsError::DecodeError {
            route: route.path().to_string(),
            message: format!("aggregate response has no `{}` member", member),
        }),
        other => Err(InsightsError::DecodeError {
            route: route.path().to_string(),
            message: format!("expected a JSON object, got {}", other),
        }),
    }
}
