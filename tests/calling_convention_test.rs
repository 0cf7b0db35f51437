use anyhow::Result;
use httpmock::prelude::*;
use pathlet_insights::{
    BirthData, CallingConvention, ClientConfig, InsightKind, InsightResult, InsightsApi,
    InsightsClient, InsightsError,
};
use serde_json::json;

const DISCRETE_ROUTES: [&str; 3] = [
    "/calculate_numerology",
    "/calculate_human_design",
    "/calculate_compatibility",
];

fn client(server: &MockServer, convention: CallingConvention) -> InsightsClient {
    let config = ClientConfig::new(server.base_url()).with_convention(convention);
    InsightsClient::new(&config).unwrap()
}

/// 聚合模式下，所有計算都只走 `/calculate_all`
#[tokio::test]
async fn test_aggregate_deployment_never_calls_discrete_endpoints() -> Result<()> {
    let server = MockServer::start();
    let discrete_mocks: Vec<_> = DISCRETE_ROUTES
        .iter()
        .map(|route| {
            server.mock(|when, then| {
                when.method(POST).path(*route);
                then.status(200).json_body(json!({}));
            })
        })
        .collect();
    let aggregate_mock = server.mock(|when, then| {
        when.method(POST).path("/calculate_all");
        then.status(200).json_body(json!({
            "numerology": {"life_path_number": 3, "description": "Creativity"},
            "human_design": {"type": "Generator", "strategy": "To Respond", "authority": "Sacral", "profile": "2/4"},
            "ascendant": {"possible_signs": ["Leo"]}
        }));
    });

    let client = client(&server, CallingConvention::Aggregate);
    let birth = BirthData::new("2000-01-01");

    let numerology = client.calculate_numerology(&birth).await?;
    let human_design = client.calculate_human_design(&birth).await?;
    let all = client.calculate_all(&birth).await?;

    assert_eq!(numerology.parse()?.life_path_number, 3);
    assert_eq!(human_design.parse()?.profile, "2/4");
    assert!(all.parse()?.ascendant.is_some());

    let err = client
        .calculate_compatibility(&birth, &BirthData::new("1999-09-09"))
        .await
        .unwrap_err();
    assert!(matches!(err, InsightsError::UnsupportedOperation { .. }));

    aggregate_mock.assert_hits(3);
    for mock in &discrete_mocks {
        mock.assert_hits(0);
    }
    Ok(())
}

#[tokio::test]
async fn test_discrete_deployment_never_calls_aggregate_endpoint() -> Result<()> {
    let server = MockServer::start();
    let aggregate_mock = server.mock(|when, then| {
        when.method(POST).path("/calculate_all");
        then.status(200).json_body(json!({}));
    });
    let numerology_mock = server.mock(|when, then| {
        when.method(POST).path("/calculate_numerology");
        then.status(200).json_body(json!({"life_path_number": 9, "description": "Compassion"}));
    });
    let human_design_mock = server.mock(|when, then| {
        when.method(POST).path("/calculate_human_design");
        then.status(200).json_body(json!({"type": "Reflector"}));
    });

    let client = client(&server, CallingConvention::Discrete);
    let birth = BirthData::new("1990-05-15");

    client.calculate_numerology(&birth).await?;
    client.calculate_human_design(&birth).await?;
    let err = client.calculate_all(&birth).await.unwrap_err();

    assert!(matches!(
        err,
        InsightsError::UnsupportedOperation { ref operation, ref convention }
            if operation == "all" && convention == "discrete"
    ));
    numerology_mock.assert();
    human_design_mock.assert();
    aggregate_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_fetch_tags_result_with_its_kind() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/get_ascendants");
        then.status(200).json_body(json!({"possible_ascendants": ["Virgo"], "instructions": "Pick one"}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/calculate_compatibility");
        then.status(200).json_body(json!({"compatibility_score": 70}));
    });

    let client = client(&server, CallingConvention::Discrete);
    let birth = BirthData::new("1990-05-15").with_location("Paris, France");
    let partner = BirthData::new("1991-03-03");

    let ascendant = client.fetch(InsightKind::Ascendant, &birth, None).await?;
    assert_eq!(ascendant.kind(), InsightKind::Ascendant);
    assert!(matches!(ascendant, InsightResult::Ascendant(_)));
    assert!(ascendant.validate().is_ok());

    let compatibility = client
        .fetch(InsightKind::Compatibility, &birth, Some(&partner))
        .await?;
    assert_eq!(compatibility.raw(), &json!({"compatibility_score": 70}));
    assert!(compatibility.validate().is_ok());
    Ok(())
}

#[tokio::test]
async fn test_fetch_compatibility_without_partner_is_rejected() {
    let server = MockServer::start();
    let any_call = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(json!({}));
    });

    let client = client(&server, CallingConvention::Discrete);
    let err = client
        .fetch(InsightKind::Compatibility, &BirthData::new("1990-05-15"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, InsightsError::ValidationError { .. }));
    any_call.assert_hits(0);
}

#[tokio::test]
async fn test_base_path_prefix_is_preserved() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/calculate_numerology");
        then.status(200).json_body(json!({"life_path_number": 1, "description": "Leadership"}));
    });

    let config = ClientConfig::new(server.url("/api"));
    let client = InsightsClient::new(&config)?;
    client.calculate_numerology(&BirthData::new("1990-05-15")).await?;

    api_mock.assert();
    Ok(())
}
