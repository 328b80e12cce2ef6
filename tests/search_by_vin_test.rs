use httpmock::prelude::*;
use serde_json::json;
use vpic_lookup::core::AttributeValue;
use vpic_lookup::{
    CatalogRepository, DecodeFailureReason, LookupError, TomlConfig, VpicClient, VpicService,
};

fn service(
    server: &MockServer,
) -> VpicService<VpicClient, CatalogRepository, CatalogRepository, VpicClient> {
    let client = VpicClient::new(server.base_url());
    VpicService::new(
        client.clone(),
        CatalogRepository::default(),
        CatalogRepository::default(),
        client,
    )
}

fn decode_body(result: serde_json::Value) -> serde_json::Value {
    json!({
        "Count": 1,
        "Message": "Results returned successfully",
        "SearchCriteria": "VIN",
        "Results": [result]
    })
}

#[tokio::test]
async fn test_search_by_vin_end_to_end() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/DecodeVinValues/1FTFW1E50LFA00001")
            .query_param("format", "json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(decode_body(json!({
                "Make": "FORD",
                "MakeID": "460",
                "Model": "F-150",
                "ModelID": "1801",
                "ModelYear": "2020",
                "ErrorCode": "0",
                "ErrorText": "0 - VIN decoded clean. Check Digit (9th position) is correct",
                "SuggestedVIN": "",
                "PossibleValues": "",
                "Transmission Style": "Automatic",
                "Doors": "4",
                "DisplacementL": "3.5",
                "EngineHP": ""
            })));
    });

    let result = service(&server)
        .search_by_vin("1FTFW1E50LFA00001")
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(result.vin, "1FTFW1E50LFA00001");
    assert_eq!(result.make, "Ford");
    assert_eq!(result.make_id, 460);
    assert_eq!(result.model, "F-150");
    assert_eq!(result.model_id, 1801);
    assert_eq!(result.year, 2020);
    assert_eq!(result.suggested_vin, None);

    assert_eq!(
        serde_json::to_value(&result.attributes).unwrap(),
        json!({
            "transmissionStyle": "Automatic",
            "doors": 4,
            "displacementL": 3.5,
            "engineHp": 0
        })
    );
}

#[tokio::test]
async fn test_search_by_vin_with_suggested_vin() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/DecodeVinValues/1FTFW1E5XLFA00001");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(decode_body(json!({
                "Make": "FORD",
                "MakeID": "460",
                "Model": "F-150",
                "ModelID": "1801",
                "ModelYear": "2020",
                "ErrorCode": "1",
                "ErrorText": "1 - Check Digit (9th position) does not calculate properly",
                "SuggestedVIN": "1FTFW1E50LFA00001",
                "Trim": "XLT"
            })));
    });

    let result = service(&server)
        .search_by_vin("1FTFW1E5XLFA00001")
        .await
        .unwrap();

    assert_eq!(result.suggested_vin.as_deref(), Some("1FTFW1E50LFA00001"));
    assert_eq!(result.attributes.len(), 1);
    assert_eq!(result.attributes.get("trim"), Some(&AttributeValue::from("XLT")));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["suggestedVin"], "1FTFW1E50LFA00001");
}

#[tokio::test]
async fn test_search_by_vin_incomplete_vin() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/DecodeVinValues/1FT");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(decode_body(json!({
                "Make": "",
                "MakeID": "",
                "ErrorCode": "6",
                "ErrorText": "6 - Incomplete VIN"
            })));
    });

    let error = service(&server).search_by_vin("1FT").await.unwrap_err();

    assert_eq!(error.code(), "SEARCH_BY_VIN_ERROR");
    assert_eq!(
        error.data(),
        json!({ "vin": "1FT", "errorCode": "6", "errorText": "Incomplete VIN" })
    );
}

#[tokio::test]
async fn test_search_by_vin_rejected_despite_identity() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/DecodeVinValues/1FTFW1E5XLFA00001");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(decode_body(json!({
                "Make": "FORD",
                "MakeID": "460",
                "Model": "F-150",
                "ModelID": "1801",
                "ModelYear": "2020",
                "ErrorCode": "1",
                "ErrorText": "1 - Check Digit (9th position) does not calculate properly"
            })));
    });

    let error = service(&server)
        .search_by_vin("1FTFW1E5XLFA00001")
        .await
        .unwrap_err();

    match error {
        LookupError::Decode(failure) => {
            assert_eq!(failure.message, "Failed to decode VIN");
            assert_eq!(
                failure.reason,
                DecodeFailureReason::Rejected {
                    error_code: Some("1".to_string())
                }
            );
        }
        other => panic!("expected decode failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_by_vin_provider_failure() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/DecodeVinValues/1FT");
        then.status(503);
    });

    let error = service(&server).search_by_vin("1FT").await.unwrap_err();

    // 只呼叫一次，不重試
    api_mock.assert_hits(1);
    assert!(!error.is_decode_failure());
    assert!(matches!(
        error,
        LookupError::ProviderError {
            status: Some(503),
            ..
        }
    ));
}

#[tokio::test]
async fn test_client_built_from_toml_config() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/vehicles/DecodeVinValues/1FT")
            .header("User-Agent", "vpic-lookup-test");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(decode_body(json!({ "ErrorCode": "6" })));
    });

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[provider]
endpoint = "{}"
timeout_seconds = 5
headers = {{ "User-Agent" = "vpic-lookup-test" }}
"#,
        server.url("/api/vehicles")
    ))
    .unwrap();

    let client = VpicClient::from_config(&config);
    let service = VpicService::new(
        client.clone(),
        CatalogRepository::default(),
        CatalogRepository::default(),
        client,
    );

    let error = service.search_by_vin("1FT").await.unwrap_err();
    api_mock.assert();
    assert!(error.is_decode_failure());
}
