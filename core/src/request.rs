//! Request configuration and the execution pipeline.
//!
//! # Design
//! `Request` is built fresh for every call and consumed by `send`, so nothing
//! is shared between calls except what the caller shares explicitly (usually
//! the transport). Fields are set either through the fluent methods here or
//! through [`RequestOption`](crate::options::RequestOption) values applied in
//! order; both replace a field, except `header` and `status_handler` which add
//! one entry to their map.
//!
//! `send` runs one linear pass: validate, serialize, dispatch, classify by
//! status, then decode or hand the response to a status handler.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::codec::{
    json_deserializer, json_serializer, Deserializer, RequestBody, ResponseSlot, Serializer,
};
use crate::error::{FetchError, HandlerKind};
use crate::handler::{default_status_handler, StatusHandler};
use crate::http::{HttpClient, HttpMethod, HttpRequest};
use crate::options::RequestOption;
use crate::transport::default_client;

/// Content type sent with every request unless a header overrides it.
const JSON_CONTENT_TYPE: &str = "application/json";

/// Configuration for a single request.
pub struct Request {
    pub(crate) method: String,
    pub(crate) url: String,
    pub(crate) content_type: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) client: Arc<dyn HttpClient>,
    pub(crate) serialize: Serializer,
    pub(crate) deserialize: Deserializer,
    pub(crate) status_handlers: HashMap<u16, StatusHandler>,
    pub(crate) default_status_handler: StatusHandler,
    pub(crate) body: Option<Box<dyn RequestBody>>,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get.into(),
            url: String::new(),
            content_type: JSON_CONTENT_TYPE.to_string(),
            headers: HashMap::new(),
            client: default_client(),
            serialize: json_serializer(),
            deserialize: json_deserializer(),
            status_handlers: HashMap::new(),
            default_status_handler: default_status_handler(),
            body: None,
        }
    }
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with `options` applied in order.
    pub fn from_options(options: impl IntoIterator<Item = RequestOption>) -> Self {
        let mut request = Self::default();
        for option in options {
            option(&mut request);
        }
        request
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Recorded with the request but not sent: the `Content-Type` header is
    /// always `application/json` unless set through [`Request::header`].
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Replace all headers.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Add one header, replacing an earlier value for the same key.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = client;
        self
    }

    pub fn serializer(mut self, serialize: Serializer) -> Self {
        self.serialize = serialize;
        self
    }

    pub fn deserializer(mut self, deserialize: Deserializer) -> Self {
        self.deserialize = deserialize;
        self
    }

    /// Replace all status handlers.
    pub fn status_handlers(mut self, handlers: HashMap<u16, StatusHandler>) -> Self {
        self.status_handlers = handlers;
        self
    }

    /// Register a handler for one status code.
    pub fn status_handler(mut self, status: u16, handler: StatusHandler) -> Self {
        self.status_handlers.insert(status, handler);
        self
    }

    pub fn default_status_handler(mut self, handler: StatusHandler) -> Self {
        self.default_status_handler = handler;
        self
    }

    pub fn body(mut self, body: impl RequestBody) -> Self {
        self.body = Some(Box::new(body));
        self
    }

    /// Apply one option in place.
    pub fn apply(&mut self, option: RequestOption) {
        option(self);
    }

    /// Send the request and produce a `T`.
    ///
    /// 200 and 201 bodies are decoded with the configured deserializer. Any
    /// other status goes to the handler registered for it, or the default
    /// handler, whose value must downcast to `T`.
    pub fn send<T>(self) -> Result<T, FetchError>
    where
        T: DeserializeOwned + Any,
    {
        if self.url.is_empty() {
            return Err(FetchError::MissingUrl);
        }
        if self.method.is_empty() {
            return Err(FetchError::MissingMethod);
        }

        let body = match &self.body {
            Some(body) => (self.serialize)(&**body).map_err(FetchError::Serialization)?,
            None => Vec::new(),
        };

        let mut request = HttpRequest::new(self.method, self.url, body);
        request.set_header("Content-Type", JSON_CONTENT_TYPE);
        for (name, value) in self.headers {
            request.set_header(name, value);
        }

        debug!(
            method = %request.method,
            url = %request.url,
            content_type = %self.content_type,
            "dispatching request"
        );
        // The response owns its body reader; dropping it on any return below
        // releases the body.
        let mut response = self.client.execute(request).map_err(FetchError::Transport)?;

        if response.status == 200 || response.status == 201 {
            let data = response.read_body().map_err(FetchError::ReadBody)?;
            let mut slot: Option<T> = None;
            (self.deserialize)(data.as_slice(), &mut slot as &mut dyn ResponseSlot)
                .map_err(FetchError::Deserialization)?;
            return slot.ok_or_else(|| {
                FetchError::Deserialization("deserializer did not produce a value".into())
            });
        }

        let (handler, kind) = match self.status_handlers.get(&response.status) {
            Some(handler) => (handler, HandlerKind::Registered(response.status_line())),
            None => (&self.default_status_handler, HandlerKind::Default),
        };
        let output = handler(&mut response).map_err(FetchError::Handler)?;
        match output.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(FetchError::HandlerTypeMismatch {
                handler: kind,
                expected: type_name::<T>(),
            }),
        }
    }
}

/// Build a request from `options` and send it.
///
/// ```no_run
/// use fetch_core::{fetch, with_body, with_method, with_url, FetchError};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Item {
///     id: u64,
///     name: String,
/// }
///
/// let item: Item = fetch([
///     with_method("POST"),
///     with_url("https://api.example/items"),
///     with_body(serde_json::json!({"name": "x"})),
/// ])?;
/// # Ok::<(), FetchError>(())
/// ```
pub fn fetch<T>(options: impl IntoIterator<Item = RequestOption>) -> Result<T, FetchError>
where
    T: DeserializeOwned + Any,
{
    Request::from_options(options).send()
}
