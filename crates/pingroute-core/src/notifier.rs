use std::error::Error as StdError;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Outcome of one submission request.
///
/// `ok` is true only when a response was received with a 2xx status. A
/// transport failure (DNS, refused connection, TLS) is recorded with
/// `status == 0` and the error text as `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// HTTP status code, or `0` when no response was received
    pub status: u16,
    /// Whether the destination accepted the request
    pub ok: bool,
    /// Response body text, or the transport error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl SubmissionResult {
    /// Record a transport failure.
    pub fn transport_failure(err: &reqwest::Error) -> Self {
        Self {
            status: 0,
            ok: false,
            body: Some(error_chain(err)),
        }
    }

    /// Record a request that was never sent.
    pub fn not_sent(reason: impl Into<String>) -> Self {
        Self {
            status: 0,
            ok: false,
            body: Some(reason.into()),
        }
    }

    async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.ok().filter(|text| !text.is_empty());
        Self {
            status: status.as_u16(),
            ok: status.is_success(),
            body,
        }
    }
}

/// HTTP client for search-engine notification requests.
///
/// No request timeout is configured; requests rely on the transport
/// defaults. Nothing is retried.
#[derive(Debug, Clone)]
pub struct Notifier {
    client: Client,
}

impl Notifier {
    /// Creates a notifier with the default HTTP client configuration.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pingroute/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub(crate) const fn client(&self) -> &Client {
        &self.client
    }

    /// POST a JSON body and capture the outcome as data.
    ///
    /// Never fails: transport errors become a [`SubmissionResult`] with
    /// status `0`.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
        bearer: Option<&str>,
    ) -> SubmissionResult {
        let payload = match serde_json::to_vec(body) {
            Ok(payload) => payload,
            Err(e) => {
                return SubmissionResult {
                    status: 0,
                    ok: false,
                    body: Some(format!("failed to encode request body: {e}")),
                };
            },
        };

        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(payload);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) => {
                let result = SubmissionResult::from_response(response).await;
                debug!("POST {} -> {}", url, result.status);
                result
            },
            Err(e) => {
                warn!("POST {} failed: {}", url, e);
                SubmissionResult::transport_failure(&e)
            },
        }
    }
}

/// Render an error with its source chain, `outer: inner: root`.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::test_support::closed_endpoint;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    #[tokio::test]
    async fn test_notifier_creation() {
        assert!(Notifier::new().is_ok(), "Notifier creation should succeed");
    }

    #[tokio::test]
    async fn test_post_json_success_records_status_and_body() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ping"))
            .and(header("content-type", "application/json; charset=utf-8"))
            .and(header("authorization", "Bearer secret"))
            .and(body_json(json!({"hello": "world"})))
            .respond_with(ResponseTemplate::new(202).set_body_string("accepted"))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = Notifier::new()?;
        let result = notifier
            .post_json(
                &format!("{}/ping", server.uri()),
                &json!({"hello": "world"}),
                Some("secret"),
            )
            .await;

        assert_eq!(
            result,
            SubmissionResult {
                status: 202,
                ok: true,
                body: Some("accepted".to_string()),
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_post_json_error_status_is_not_ok() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let result = Notifier::new()?
            .post_json(&server.uri(), &json!({}), None)
            .await;

        assert_eq!(result.status, 422);
        assert!(!result.ok);
        assert_eq!(result.body, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_transport_failure_is_recorded() -> anyhow::Result<()> {
        let result = Notifier::new()?
            .post_json(&closed_endpoint(), &json!({}), None)
            .await;

        assert_eq!(result.status, 0);
        assert!(!result.ok);
        assert!(result.body.is_some_and(|body| !body.is_empty()));
        Ok(())
    }
}
