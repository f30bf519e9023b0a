use neighborly_application::ProviderError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

const ERROR_SNIPPET_CHARS: usize = 200;

/// Sends one JSON request and decodes the JSON answer.
///
/// 401 maps to [`ProviderError::Auth`], 429 to [`ProviderError::RateLimit`],
/// every other non-success status and network failure to
/// [`ProviderError::Transport`]. Undecodable bodies are [`ProviderError::Parse`].
pub(crate) async fn post_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    body: &Value,
) -> Result<T, ProviderError> {
    let response = request
        .json(body)
        .send()
        .await
        .map_err(|error| ProviderError::Transport(error.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|error| ProviderError::Transport(error.to_string()))?;

    if !status.is_success() {
        debug!(%status, "generation provider returned a non-success status");
        return Err(status_error(status, &text));
    }

    serde_json::from_str(&text)
        .map_err(|error| ProviderError::Parse(format!("unexpected response body: {error}")))
}

fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let snippet: String = body.trim().chars().take(ERROR_SNIPPET_CHARS).collect();
    let message = if snippet.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {snippet}")
    };

    match status {
        StatusCode::UNAUTHORIZED => ProviderError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimit(message),
        _ => ProviderError::Transport(message),
    }
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use neighborly_application::ProviderError;
    use reqwest::StatusCode;

    use super::{endpoint, status_error};

    #[test]
    fn status_codes_map_to_provider_errors() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "bad key"),
            ProviderError::Auth(message) if message.contains("bad key")
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, ""),
            ProviderError::RateLimit(_)
        ));
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            ProviderError::Transport(_)
        ));
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        assert_eq!(
            endpoint("https://api.openai.com/v1/", "/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
