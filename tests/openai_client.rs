use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use home_diagnosis_backend::completion::{
    CompletionError, CompletionRequest, CompletionService, OpenAiClient,
};

fn request() -> CompletionRequest {
    CompletionRequest {
        system_instruction: "You diagnose home issues.".to_string(),
        user_prompt: "A pipe leak has been reported at the bathroom.".to_string(),
        temperature: 0.0,
    }
}

#[tokio::test]
async fn test_returns_first_choice_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4",
            "temperature": 0.0,
            "messages": [
                {"role": "system", "content": "You diagnose home issues."},
                {"role": "user", "content": "A pipe leak has been reported at the bathroom."}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Tighten the joint."}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "Ignored."}, "finish_reason": "stop"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(format!("{}/v1", mock_server.uri()), "sk-test", "gpt-4");
    let diagnosis = client.complete(request()).await.unwrap();

    assert_eq!(diagnosis, "Tighten the joint.");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(mock_server.uri(), "sk-test", "gpt-4");
    let err = client.complete(request()).await.unwrap_err();

    match err {
        CompletionError::Status { status, body } => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(body, "quota exceeded");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_choices() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(mock_server.uri(), "sk-test", "gpt-4");
    let err = client.complete(request()).await.unwrap_err();

    assert!(matches!(err, CompletionError::EmptyChoices));
}

#[tokio::test]
async fn test_null_content_and_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/null/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/broken/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::new(format!("{}/null", mock_server.uri()), "sk-test", "gpt-4");
    assert!(matches!(
        client.complete(request()).await.unwrap_err(),
        CompletionError::MissingContent
    ));

    let client = OpenAiClient::new(format!("{}/broken", mock_server.uri()), "sk-test", "gpt-4");
    assert!(matches!(
        client.complete(request()).await.unwrap_err(),
        CompletionError::Http(_)
    ));
}
