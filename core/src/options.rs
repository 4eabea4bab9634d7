//! Request options: boxed mutators applied to a default [`Request`].
//!
//! Each `with_*` function mirrors the builder method of the same name.

use std::collections::HashMap;
use std::sync::Arc;

use crate::codec::{Deserializer, RequestBody, Serializer};
use crate::handler::StatusHandler;
use crate::http::HttpClient;
use crate::request::Request;

/// One configuration change, applied in order by [`Request::from_options`].
pub type RequestOption = Box<dyn FnOnce(&mut Request)>;

pub fn with_method(method: impl Into<String>) -> RequestOption {
    let method = method.into();
    Box::new(move |r: &mut Request| r.method = method)
}

pub fn with_url(url: impl Into<String>) -> RequestOption {
    let url = url.into();
    Box::new(move |r: &mut Request| r.url = url)
}

pub fn with_content_type(content_type: impl Into<String>) -> RequestOption {
    let content_type = content_type.into();
    Box::new(move |r: &mut Request| r.content_type = content_type)
}

/// Replace all headers.
pub fn with_headers(headers: HashMap<String, String>) -> RequestOption {
    Box::new(move |r: &mut Request| r.headers = headers)
}

/// Add one header to those already set.
pub fn with_header(name: impl Into<String>, value: impl Into<String>) -> RequestOption {
    let (name, value) = (name.into(), value.into());
    Box::new(move |r: &mut Request| {
        r.headers.insert(name, value);
    })
}

pub fn with_client(client: Arc<dyn HttpClient>) -> RequestOption {
    Box::new(move |r: &mut Request| r.client = client)
}

pub fn with_serializer(serialize: Serializer) -> RequestOption {
    Box::new(move |r: &mut Request| r.serialize = serialize)
}

pub fn with_deserializer(deserialize: Deserializer) -> RequestOption {
    Box::new(move |r: &mut Request| r.deserialize = deserialize)
}

/// Replace all status handlers.
pub fn with_status_handlers(handlers: HashMap<u16, StatusHandler>) -> RequestOption {
    Box::new(move |r: &mut Request| r.status_handlers = handlers)
}

/// Add a handler for one status code to those already registered.
pub fn with_status_handler(status: u16, handler: StatusHandler) -> RequestOption {
    Box::new(move |r: &mut Request| {
        r.status_handlers.insert(status, handler);
    })
}

pub fn with_default_status_handler(handler: StatusHandler) -> RequestOption {
    Box::new(move |r: &mut Request| r.default_status_handler = handler)
}

pub fn with_body(body: impl RequestBody) -> RequestOption {
    Box::new(move |r: &mut Request| r.body = Some(Box::new(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::status_handler;
    use crate::http::HttpResponse;

    fn unit_handler() -> StatusHandler {
        status_handler(|_: &mut HttpResponse| Ok(()))
    }

    #[test]
    fn later_options_override_earlier_ones() {
        let request = Request::from_options([
            with_method("POST"),
            with_url("http://a"),
            with_method("PUT"),
            with_url("http://b"),
            with_content_type("text/plain"),
        ]);
        assert_eq!(request.method, "PUT");
        assert_eq!(request.url, "http://b");
        assert_eq!(request.content_type, "text/plain");
    }

    #[test]
    fn with_header_accumulates() {
        let request = Request::from_options([
            with_header("A", "1"),
            with_header("B", "2"),
            with_header("A", "3"),
        ]);
        assert_eq!(request.headers.len(), 2);
        assert_eq!(request.headers["A"], "3");
        assert_eq!(request.headers["B"], "2");
    }

    #[test]
    fn with_headers_replaces_the_map() {
        let request = Request::from_options([
            with_header("A", "1"),
            with_headers(HashMap::from([("B".to_string(), "2".to_string())])),
        ]);
        assert_eq!(request.headers.len(), 1);
        assert!(!request.headers.contains_key("A"));
    }

    #[test]
    fn status_handler_options_accumulate_and_replace() {
        let request = Request::from_options([
            with_status_handler(404, unit_handler()),
            with_status_handler(500, unit_handler()),
        ]);
        assert_eq!(request.status_handlers.len(), 2);

        let request = Request::from_options([
            with_status_handler(404, unit_handler()),
            with_status_handlers(HashMap::from([(409, unit_handler())])),
        ]);
        assert_eq!(request.status_handlers.keys().copied().collect::<Vec<_>>(), vec![409]);
    }

    #[test]
    fn defaults_survive_unrelated_options() {
        let mut request = Request::from_options([with_body(vec![1, 2, 3])]);
        assert_eq!(request.method, "GET");
        assert_eq!(request.content_type, "application/json");
        assert!(request.body.is_some());

        request.apply(with_method(""));
        assert!(request.method.is_empty());
    }
}
