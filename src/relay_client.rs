use futures_util::TryFutureExt;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Response};
use tracing::debug;

use crate::place_order::dto::SubmittedOrder;
use crate::place_order::public_types::RelayOutcome;

pub const DEFAULT_RELAY_URL: &str = "http://localhost:3001/api/submit-order";

/// Sends orders to the local relay service.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    url: String,
}

impl RelayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One POST, no retries. Whatever the relay answers is returned verbatim;
    /// only a failed exchange becomes [`RelayOutcome::ConnectionFailed`].
    pub async fn submit(&self, order: SubmittedOrder) -> RelayOutcome {
        debug!(url = %self.url, "posting order to relay");

        let exchange = self
            .client
            .post(&self.url)
            .json(&order)
            .send()
            .and_then(|response| async move {
                let status = response.status();
                let status_text = status_text(&response);
                let body = response.text().await?;
                Ok::<_, reqwest::Error>((status, status_text, body))
            })
            .await;

        match exchange {
            Ok((status, status_text, body)) => RelayOutcome::Completed {
                status: status.as_u16(),
                status_text,
                body,
            },
            Err(err) => RelayOutcome::ConnectionFailed {
                message: connection_failed_message(&self.url, &err),
            },
        }
    }
}

impl Default for RelayClient {
    fn default() -> Self {
        Self::new(DEFAULT_RELAY_URL)
    }
}

/// Reason phrase from the status line. hyper records it only when it differs
/// from the canonical one, so the canonical phrase is the fallback.
pub fn status_text(response: &Response) -> String {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
        .or_else(|| response.status().canonical_reason().map(str::to_owned))
        .unwrap_or_default()
}

fn connection_failed_message(url: &str, err: &reqwest::Error) -> String {
    format!(
        "Failed to connect to the relay service.\n\n\
         Error: {err}\n\n\
         Make sure the relay is running:\n\n\
         1. Open a new terminal\n\
         2. Set CLIENT_ID, CLIENT_SECRET and B2B_API_URL\n\
         3. Run `po-relay`\n\n\
         The relay should be listening at {url}"
    )
}
