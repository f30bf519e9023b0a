use neighborly_application::{GenerationProvider, ProviderError, ProviderRequest};
use neighborly_domain::ProviderKind;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::GeminiGenerationProvider;

const GENERATE_PATH: &str = "/models/gemini-1.5-flash:generateContent";

fn provider(server: &MockServer) -> GeminiGenerationProvider {
    GeminiGenerationProvider::new(
        reqwest::Client::new(),
        server.uri(),
        "gemini-key",
        "gemini-1.5-flash",
    )
}

fn request() -> ProviderRequest {
    ProviderRequest {
        system_instruction: "Respond with JSON only.".to_owned(),
        prompt: "Review this newsletter draft.".to_owned(),
        temperature: 0.5,
        max_output_tokens: 400,
    }
}

#[tokio::test]
async fn concatenates_candidate_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "gemini-key"))
        .and(body_partial_json(json!({
            "systemInstruction": { "parts": [{ "text": "Respond with JSON only." }] },
            "contents": [{ "role": "user", "parts": [{ "text": "Review this newsletter draft." }] }],
            "generationConfig": {
                "maxOutputTokens": 400,
                "responseMimeType": "application/json"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [
                            { "text": "{\"feedback\":" },
                            { "text": "\"Friendly tone, add dates.\"}" }
                        ]
                    }
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider(&server);
    let text = provider.generate(&request()).await;

    assert_eq!(provider.kind(), ProviderKind::Gemini);
    assert_eq!(
        text.ok().as_deref(),
        Some("{\"feedback\":\"Friendly tone, add dates.\"}")
    );
}

#[tokio::test]
async fn empty_candidates_map_to_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let result = provider(&server).generate(&request()).await;

    assert!(matches!(result, Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = provider(&server).generate(&request()).await;

    assert!(matches!(result, Err(ProviderError::Auth(_))));
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(429).set_body_string("{\"error\":{\"status\":\"RESOURCE_EXHAUSTED\"}}"),
        )
        .mount(&server)
        .await;

    let result = provider(&server).generate(&request()).await;

    assert!(
        matches!(result, Err(ProviderError::RateLimit(message)) if message.contains("RESOURCE_EXHAUSTED"))
    );
}

#[tokio::test]
async fn bad_request_maps_to_transport() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let result = provider(&server).generate(&request()).await;

    assert!(matches!(result, Err(ProviderError::Transport(_))));
}
