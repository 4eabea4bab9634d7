//! Status handlers for responses other than 200 and 201.

use std::any::Any;
use std::sync::Arc;

use tracing::warn;

use crate::error::BoxError;
use crate::http::HttpResponse;

/// Value produced by a status handler. The executor downcasts it to the
/// caller's result type.
pub type HandlerOutput = Box<dyn Any + Send>;

pub type StatusHandler =
    Arc<dyn Fn(&mut HttpResponse) -> Result<HandlerOutput, BoxError> + Send + Sync>;

/// Wrap a typed closure as a [`StatusHandler`].
///
/// ```
/// use fetch_core::status_handler;
///
/// let not_found = status_handler(|_response| Ok(Vec::<String>::new()));
/// ```
pub fn status_handler<V, F>(handler: F) -> StatusHandler
where
    V: Any + Send,
    F: Fn(&mut HttpResponse) -> Result<V, BoxError> + Send + Sync + 'static,
{
    Arc::new(move |response: &mut HttpResponse| -> Result<HandlerOutput, BoxError> {
        handler(response).map(|value| Box::new(value) as HandlerOutput)
    })
}

/// The handler used when no handler is registered for a status.
///
/// Logs the status, URL and both bodies, then returns `()`. Reads are
/// best-effort. Only a `()` result type accepts its value.
pub fn default_status_handler() -> StatusHandler {
    Arc::new(|response: &mut HttpResponse| -> Result<HandlerOutput, BoxError> {
        let (url, request_body) = match &response.request {
            Some(request) => (
                request.url.clone(),
                String::from_utf8_lossy(&request.body).into_owned(),
            ),
            None => (String::new(), String::new()),
        };
        let response_body = response
            .read_body()
            .map(|data| String::from_utf8_lossy(&data).into_owned())
            .unwrap_or_default();

        warn!(
            status = %response.status_line(),
            url = %url,
            request_body = %request_body,
            response_body = %response_body,
            "handling unknown status"
        );
        Ok(Box::new(()))
    })
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use super::*;
    use crate::http::HttpRequest;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn status_handler_boxes_typed_value() {
        let handler = status_handler(|response: &mut HttpResponse| Ok(response.status));
        let mut response = HttpResponse::new(418, io::empty());
        let output = handler(&mut response).unwrap();
        assert_eq!(*output.downcast::<u16>().unwrap(), 418);
    }

    #[test]
    fn status_handler_passes_errors_through() {
        let handler = status_handler(|_: &mut HttpResponse| -> Result<u16, BoxError> { Err("nope".into()) });
        let mut response = HttpResponse::new(500, io::empty());
        assert_eq!(handler(&mut response).unwrap_err().to_string(), "nope");
    }

    #[test]
    fn default_handler_returns_unit_and_drains_body() {
        let request = HttpRequest::new("POST", "http://localhost/items", br#"{"name":"x"}"#.to_vec());
        let mut response = HttpResponse::new(404, &b"missing"[..]).with_request(request);
        let output = default_status_handler()(&mut response).unwrap();
        assert!(output.downcast::<()>().is_ok());
        assert!(response.read_body().unwrap().is_empty());
    }

    #[test]
    fn default_handler_ignores_read_errors() {
        let mut response = HttpResponse::new(502, FailingReader);
        assert!(default_status_handler()(&mut response).is_ok());
    }
}
