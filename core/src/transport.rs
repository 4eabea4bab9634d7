//! Default transport backed by a blocking ureq agent.

use std::sync::{Arc, OnceLock};

use crate::error::BoxError;
use crate::http::{HttpClient, HttpRequest, HttpResponse};

/// [`HttpClient`] that executes requests with ureq.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses come back as data and reach the status handlers.
#[derive(Debug, Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use a caller-configured agent. It should not treat HTTP statuses as
    /// errors, otherwise status handlers never run.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for UreqClient {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let mut builder = ureq::http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = if request.body.is_empty() {
            self.agent.run(builder.body(())?)?
        } else {
            self.agent.run(builder.body(request.body.as_slice())?)?
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.into_body().into_reader();

        Ok(HttpResponse {
            status,
            headers,
            body: Box::new(body),
            request: Some(request),
        })
    }
}

/// Process-wide transport used when a request sets no client.
pub(crate) fn default_client() -> Arc<dyn HttpClient> {
    static CLIENT: OnceLock<Arc<UreqClient>> = OnceLock::new();
    CLIENT.get_or_init(|| Arc::new(UreqClient::new())).clone()
}
