use std::time::Duration;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::debug;

use identity_harness_core::agent::admin::types::{
    AdminAPI, AdminError, AdminRequest, HEADER_API_KEY,
};

use crate::config::Agent;

/// `AdminClient` is the [`AdminAPI`] implementation backed by `reqwest`
///
/// Every request carries the configured timeout and the `X-API-Key` header when an
/// api key is configured. It never retries.
#[derive(Clone)]
pub struct AdminClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl AdminClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        }
    }

    pub fn from_config(agent: &Agent) -> Self {
        Self::new(
            &agent.admin_url(),
            agent.api_key(),
            Duration::from_secs(agent.timeout_secs()),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl AdminAPI for AdminClient {
    async fn send(&self, request: AdminRequest) -> Result<Value, AdminError> {
        let url = self.build_url(request.path());
        debug!("[admin:send] {} {}", request.method(), url);

        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .timeout(self.timeout);

        if !request.params().is_empty() {
            builder = builder.query(request.params());
        }

        if let Some(api_key) = &self.api_key {
            builder = builder.header(HEADER_API_KEY, api_key);
        }

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| AdminError::TransportError(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| AdminError::TransportError(err.to_string()))?;

        if !status.is_success() {
            return Err(AdminError::StatusError {
                status: status.as_u16(),
                message: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        rst_common::standard::serde_json::from_str(&text)
            .map_err(|err| AdminError::JSONError(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    use rst_common::standard::serde_json::json;
    use rst_common::with_tokio::tokio;

    fn generate_client(url: &str, api_key: Option<&str>) -> AdminClient {
        AdminClient::new(
            url,
            api_key.map(|key| key.to_string()),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_send_post_with_query_and_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/out-of-band/create-invitation")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("auto_accept".into(), "true".into()),
                Matcher::UrlEncoded("multi_use".into(), "false".into()),
            ]))
            .match_header("x-api-key", "secret")
            .match_body(Matcher::Json(json!({"handshake_protocols": ["rfc23"]})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"invi_msg_id": "invi-1"}"#)
            .create_async()
            .await;

        let client = generate_client(&server.url(), Some("secret"));
        let request = AdminRequest::post("/out-of-band/create-invitation")
            .with_body(json!({"handshake_protocols": ["rfc23"]}))
            .with_param("auto_accept", true)
            .with_param("multi_use", false);

        let response = client.send(request).await;
        mock.assert_async().await;
        assert_eq!(response, Ok(json!({"invi_msg_id": "invi-1"})));
    }

    #[tokio::test]
    async fn test_send_without_api_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/mediation/requests/r1")
            .match_header("x-api-key", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"state": "granted"}"#)
            .create_async()
            .await;

        let client = generate_client(&format!("{}/", server.url()), None);
        let response = client
            .send(AdminRequest::get("/mediation/requests/r1"))
            .await;

        mock.assert_async().await;
        assert_eq!(response, Ok(json!({"state": "granted"})));
    }

    #[tokio::test]
    async fn test_send_status_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/connections/receive-invitation")
            .with_status(422)
            .with_body("invalid invitation")
            .create_async()
            .await;

        let client = generate_client(&server.url(), None);
        let response = client
            .send(AdminRequest::post("/connections/receive-invitation").with_body(json!({})))
            .await;

        assert_eq!(
            response,
            Err(AdminError::StatusError {
                status: 422,
                message: "invalid invitation".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_send_empty_and_invalid_body() {
        let mut server = Server::new_async().await;
        let _empty = server
            .mock("POST", "/transactions/c1/set-endorser-role")
            .with_status(200)
            .create_async()
            .await;
        let _invalid = server
            .mock("GET", "/wallet/did/public")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = generate_client(&server.url(), None);
        let empty = client
            .send(AdminRequest::post("/transactions/c1/set-endorser-role"))
            .await;
        assert_eq!(empty, Ok(Value::Null));

        let invalid = client.send(AdminRequest::get("/wallet/did/public")).await;
        assert!(matches!(invalid, Err(AdminError::JSONError(_))));
    }

    #[tokio::test]
    async fn test_send_transport_error() {
        let client = generate_client("http://127.0.0.1:1", None);
        let response = client.send(AdminRequest::get("/status")).await;
        assert!(matches!(response, Err(AdminError::TransportError(_))));
    }
}
