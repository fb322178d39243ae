use extrakt_engine::extractor::{ExtractionRequest, ExtractionResult, Extractor};
use extrakt_engine::providers::{Provider, ProviderRouter};
use extrakt_engine::{EngineConfig, EngineError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn person_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "age": { "type": "integer" }
        },
        "required": ["name", "age"],
        "additionalProperties": false
    })
}

fn person_request() -> ExtractionRequest {
    ExtractionRequest {
        prompt: "Extract the person: Ada Lovelace, age 36.".to_string(),
        schema: person_schema(),
        provider: None,
        model: None,
    }
}

fn engine_config(server: &MockServer) -> EngineConfig {
    EngineConfig::builder()
        .api_key(Provider::OpenAi, "test-key")
        .base_url(Provider::OpenAi, server.uri())
        .build()
}

fn chat_response(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

#[tokio::test]
async fn test_conforming_first_attempt_makes_one_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&chat_response(
            r#"{"name": "Ada Lovelace", "age": 36}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = engine_config(&mock_server);
    let router = ProviderRouter::new(&config).expect("provider router");
    let extractor = Extractor::new(&router, &config);

    let result = extractor
        .extract(&person_request())
        .await
        .expect("extraction");

    assert_eq!(
        result,
        ExtractionResult::Valid {
            provider: Provider::OpenAi,
            model: "gpt-4o-mini".to_string(),
            value: json!({"name": "Ada Lovelace", "age": 36}),
        }
    );
}

#[tokio::test]
async fn test_second_attempt_recovers_from_invalid_output() {
    let mock_server = MockServer::start().await;

    // First call answers with a required field missing, second call conforms.
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&chat_response(r#"{"name": "Ada Lovelace"}"#)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&chat_response(
            r#"{"name": "Ada Lovelace", "age": 36}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = engine_config(&mock_server);
    let router = ProviderRouter::new(&config).expect("provider router");
    let extractor = Extractor::new(&router, &config);

    let result = extractor
        .extract(&person_request())
        .await
        .expect("extraction");

    assert_eq!(
        result,
        ExtractionResult::Valid {
            provider: Provider::OpenAi,
            model: "gpt-4o-mini".to_string(),
            value: json!({"name": "Ada Lovelace", "age": 36}),
        }
    );
}

#[tokio::test]
async fn test_exhausted_attempts_keep_last_raw_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&chat_response(r#"{"name": "Ada Lovelace"}"#)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&chat_response(r#"{"name": "Grace Hopper"}"#)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = engine_config(&mock_server);
    let router = ProviderRouter::new(&config).expect("provider router");
    let extractor = Extractor::new(&router, &config);

    let result = extractor
        .extract(&person_request())
        .await
        .expect("extraction");

    assert_eq!(
        result,
        ExtractionResult::Invalid {
            provider: Provider::OpenAi,
            model: "gpt-4o-mini".to_string(),
            reason: "Model output did not validate against schema".to_string(),
            raw: r#"{"name": "Grace Hopper"}"#.to_string(),
        }
    );
}

#[tokio::test]
async fn test_vendor_error_aborts_without_second_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream maintenance"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = engine_config(&mock_server);
    let router = ProviderRouter::new(&config).expect("provider router");
    let extractor = Extractor::new(&router, &config);

    let err = extractor
        .extract(&person_request())
        .await
        .expect_err("vendor failure");

    assert!(matches!(err, EngineError::ProviderApi { status: 503, .. }));
}

#[tokio::test]
async fn test_default_model_fills_the_wire_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "model": "gpt-4o-mini" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&chat_response(
            r#"{"name": "Ada Lovelace", "age": 36}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = engine_config(&mock_server);
    let router = ProviderRouter::new(&config).expect("provider router");
    let extractor = Extractor::new(&router, &config);

    let result = extractor
        .extract(&person_request())
        .await
        .expect("extraction");

    assert!(matches!(result, ExtractionResult::Valid { .. }));
}

#[tokio::test]
async fn test_model_override_reaches_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "model": "gpt-4.1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&chat_response(
            r#"{"name": "Ada Lovelace", "age": 36}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = engine_config(&mock_server);
    let router = ProviderRouter::new(&config).expect("provider router");
    let extractor = Extractor::new(&router, &config);

    let mut request = person_request();
    request.model = Some("gpt-4.1".to_string());

    let result = extractor.extract(&request).await.expect("extraction");

    assert!(matches!(
        result,
        ExtractionResult::Valid { model, .. } if model == "gpt-4.1"
    ));
}

#[tokio::test]
async fn test_user_payload_serializes_prompt_and_schema() {
    let mock_server = MockServer::start().await;

    let expected_user = json!({
        "prompt": "Extract the person: Ada Lovelace, age 36.",
        "schema": person_schema(),
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system" },
                { "role": "user", "content": expected_user }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&chat_response(
            r#"{"name": "Ada Lovelace", "age": 36}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = engine_config(&mock_server);
    let router = ProviderRouter::new(&config).expect("provider router");
    let extractor = Extractor::new(&router, &config);

    let result = extractor
        .extract(&person_request())
        .await
        .expect("extraction");

    assert!(matches!(result, ExtractionResult::Valid { .. }));
}
