//! Single-call HTTP request helper with typed results.
//!
//! # Overview
//! A [`Request`] is assembled from defaults plus options (or builder calls),
//! sent through a pluggable [`HttpClient`], and its response turned into a
//! caller-chosen type `T`. Status 200 and 201 are decoded with the configured
//! deserializer; every other status is handed to a [`StatusHandler`]
//! registered for that code, or to the default handler.
//!
//! # Design
//! - Each call builds and consumes its own `Request`; nothing is retained.
//! - The transport, codecs and handlers are trait objects, so tests swap in
//!   scripted clients and callers can replace JSON with another format.
//! - Handler values are `Box<dyn Any + Send>` and are downcast to `T`; a
//!   value of another type is reported as `HandlerTypeMismatch`.
//! - `Content-Type: application/json` is always sent unless a header with
//!   that name is configured; the content-type setting does not change it.

pub mod codec;
pub mod error;
pub mod handler;
pub mod http;
pub mod options;
pub mod request;
pub mod transport;

pub use codec::{
    json_deserializer, json_serializer, Deserializer, RequestBody, ResponseSlot, Serializer,
};
pub use error::{BoxError, FetchError, HandlerKind};
pub use handler::{default_status_handler, status_handler, HandlerOutput, StatusHandler};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use options::{
    with_body, with_client, with_content_type, with_default_status_handler, with_deserializer,
    with_header, with_headers, with_method, with_serializer, with_status_handler,
    with_status_handlers, with_url, RequestOption,
};
pub use request::{fetch, Request};
pub use transport::UreqClient;
