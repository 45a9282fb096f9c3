use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::TryFutureExt;
use hyper::ext::ReasonPhrase;
use reqwest::Client;
use serde_json::json;
use serde_json::value::RawValue;
use tracing::{debug, info, warn};

use crate::relay::config::RelayConfig;
use crate::relay_client::status_text;

pub const SUCCESS_MESSAGE: &str = "Order submitted successfully";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamBody {
    Empty,
    Raw(String),
}

impl From<String> for UpstreamBody {
    fn from(text: String) -> Self {
        if text.is_empty() {
            UpstreamBody::Empty
        } else {
            UpstreamBody::Raw(text)
        }
    }
}

/// Status line and body exactly as the intake API returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub status_text: String,
    pub body: UpstreamBody,
}

impl UpstreamResponse {
    /// The body relayed back to the caller: the upstream text untouched, or a
    /// synthesized envelope when the upstream sent nothing. A non-empty body is
    /// never replaced, even if it isn't JSON.
    pub fn relay_body(&self) -> String {
        match &self.body {
            UpstreamBody::Raw(text) => text.clone(),
            UpstreamBody::Empty => json!({
                "status": self.status.as_u16(),
                "statusText": self.status_text,
                "message": SUCCESS_MESSAGE,
            })
            .to_string(),
        }
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let body = self.relay_body();
        let mut response = (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response();

        if self.status.canonical_reason() != Some(self.status_text.as_str()) {
            match ReasonPhrase::try_from(self.status_text) {
                Ok(reason) => {
                    response.extensions_mut().insert(reason);
                }
                Err(err) => warn!(error = %err, "upstream reason phrase not relayed"),
            }
        }
        response
    }
}

/// The relay could not complete the exchange with the intake API.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ForwardError(#[from] reqwest::Error);

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let envelope = json!({
            "error": "Relay Error",
            "message": self.to_string(),
            "details": "Failed to forward request to the upstream intake API",
        });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(envelope)).into_response()
    }
}

/// Client for the one upstream call the relay makes.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    url: String,
    client_id: String,
    client_secret: String,
}

impl UpstreamClient {
    /// The certificate flag applies to this client alone; nothing else in the
    /// process shares it.
    pub fn new(config: &RelayConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self {
            client,
            url: config.upstream_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    /// Posts `body` to the intake API byte for byte, with the credential headers.
    pub async fn forward(&self, body: &RawValue) -> Result<UpstreamResponse, ForwardError> {
        info!(url = %self.url, "forwarding to upstream");

        let (status, status_text, text) = self
            .client
            .post(&self.url)
            .header("client_id", &self.client_id)
            .header("client_secret", &self.client_secret)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.get().to_owned())
            .send()
            .and_then(|response| async move {
                let status = response.status();
                let status_text = status_text(&response);
                let text = response.text().await?;
                Ok::<_, reqwest::Error>((status, status_text, text))
            })
            .await?;

        info!(
            status = status.as_u16(),
            status_text = %status_text,
            "upstream responded"
        );
        debug!(body = %text, "upstream response body");

        Ok(UpstreamResponse {
            status,
            status_text,
            body: text.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn empty_body_is_replaced_by_envelope() {
        let response = UpstreamResponse {
            status: StatusCode::OK,
            status_text: "OK".into(),
            body: String::new().into(),
        };
        let body: Value = serde_json::from_str(&response.relay_body()).unwrap();
        assert_eq!(
            body,
            json!({"status": 200, "statusText": "OK", "message": "Order submitted successfully"})
        );
    }

    #[test]
    fn non_json_body_is_passed_through() {
        let response = UpstreamResponse {
            status: StatusCode::BAD_GATEWAY,
            status_text: "Bad Gateway".into(),
            body: "upstream exploded".to_string().into(),
        };
        assert_eq!(response.relay_body(), "upstream exploded");
    }

    #[test]
    fn envelope_and_response_keep_custom_reason_phrase() {
        let response = UpstreamResponse {
            status: StatusCode::OK,
            status_text: "Order Received".into(),
            body: UpstreamBody::Empty,
        };
        let body: Value = serde_json::from_str(&response.relay_body()).unwrap();
        assert_eq!(body["statusText"], json!("Order Received"));

        let relayed = response.into_response();
        let reason = relayed.extensions().get::<ReasonPhrase>().unwrap();
        assert_eq!(reason.as_bytes(), b"Order Received");
    }

    #[test]
    fn canonical_reason_phrase_is_not_attached() {
        let response = UpstreamResponse {
            status: StatusCode::ACCEPTED,
            status_text: "Accepted".into(),
            body: "{}".to_string().into(),
        };
        assert!(response.into_response().extensions().get::<ReasonPhrase>().is_none());
    }

    #[test]
    fn whitespace_body_is_not_empty() {
        assert_eq!(UpstreamBody::from(" ".to_string()), UpstreamBody::Raw(" ".into()));
    }
}
