//! HTTP client for `POST /api/ask`

use super::traits::AskClient;
use super::RuntimeError;
use crate::api::{AskRequest, AskResponse, ErrorResponse};
use crate::chat::CompletionResult;
use async_trait::async_trait;
use reqwest::Client;

/// Talks to a running ask proxy
pub struct HttpAskClient {
    client: Client,
    ask_url: String,
}

impl HttpAskClient {
    pub fn new(server_url: &str) -> Result<Self, RuntimeError> {
        Ok(Self {
            client: Client::builder().build()?,
            ask_url: format!("{}/api/ask", server_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl AskClient for HttpAskClient {
    async fn ask(&self, question: &str) -> CompletionResult {
        let response = match self
            .client
            .post(&self.ask_url)
            .json(&AskRequest::new(question))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Ask request failed");
                return CompletionResult::Failed(format!("Request failed: {e}"));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Failed to get response".to_string()),
                Err(_) => format!("Server error: {}", status.as_u16()),
            };
            tracing::warn!(status = status.as_u16(), %message, "Ask rejected");
            return CompletionResult::Failed(message);
        }

        match response.json::<AskResponse>().await {
            Ok(body) => CompletionResult::Answer(body.answer.unwrap_or_default()),
            Err(e) => {
                tracing::error!(error = %e, "Unreadable ask response");
                CompletionResult::Failed(format!("Unreadable response: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/")
    }

    async fn canned(status: StatusCode, body: &'static str) -> String {
        serve(Router::new().route(
            "/api/ask",
            post(move || async move { (status, body).into_response() }),
        ))
        .await
    }

    #[tokio::test]
    async fn test_answer() {
        let url = serve(Router::new().route(
            "/api/ask",
            post(|Json(req): Json<Value>| async move {
                Json(json!({ "answer": format!("You asked: {}", req["question"].as_str().unwrap()) }))
            }),
        ))
        .await;
        let client = HttpAskClient::new(&url).unwrap();
        assert_eq!(
            client.ask("hello").await,
            CompletionResult::Answer("You asked: hello".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_answer_is_empty() {
        let url = canned(StatusCode::OK, "{}").await;
        let client = HttpAskClient::new(&url).unwrap();
        let result = client.ask("q").await;
        assert_eq!(result, CompletionResult::Answer(String::new()));
        assert_eq!(result.display_text(), "No response received.");
    }

    #[tokio::test]
    async fn test_error_message_from_body() {
        let url = canned(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Question too long. Max 250 characters."}"#,
        )
        .await;
        let client = HttpAskClient::new(&url).unwrap();
        assert_eq!(
            client.ask("q").await,
            CompletionResult::Failed("Question too long. Max 250 characters.".to_string())
        );
    }

    #[tokio::test]
    async fn test_unparseable_error_uses_status() {
        let url = canned(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").await;
        let client = HttpAskClient::new(&url).unwrap();
        assert_eq!(
            client.ask("q").await,
            CompletionResult::Failed("Server error: 502".to_string())
        );
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpAskClient::new(&format!("http://{addr}")).unwrap();
        let result = client.ask("q").await;
        assert!(matches!(result, CompletionResult::Failed(_)));
        assert_eq!(
            result.display_text(),
            "Sorry, I encountered an error. Please try again."
        );
    }
}
