//! Body codecs.
//!
//! # Design
//! The request body is stored untyped as a `Box<dyn RequestBody>`, and the
//! success result is decoded into a `&mut dyn ResponseSlot`. Both traits are
//! blanket-implemented for serde types, which lets the serializer and
//! deserializer be plain boxed functions that are swapped per request
//! without making the request generic over its body or result type.
//!
//! A custom codec that does not speak JSON reaches the concrete value
//! through `as_any` / `as_any_mut` and downcasts.

use std::any::Any;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::BoxError;

/// An untyped request body.
pub trait RequestBody: Any {
    fn to_json(&self) -> serde_json::Result<Vec<u8>>;
    fn as_any(&self) -> &dyn Any;
}

impl<T: Serialize + Any> RequestBody for T {
    fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Output slot the deserializer fills with the decoded result.
///
/// The executor hands an empty `Option<T>` in; a deserializer that returns
/// `Ok` must leave it `Some`.
pub trait ResponseSlot: Any {
    fn fill_from_json(&mut self, data: &[u8]) -> serde_json::Result<()>;
    fn is_filled(&self) -> bool;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: DeserializeOwned + Any> ResponseSlot for Option<T> {
    fn fill_from_json(&mut self, data: &[u8]) -> serde_json::Result<()> {
        *self = Some(serde_json::from_slice(data)?);
        Ok(())
    }

    fn is_filled(&self) -> bool {
        self.is_some()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub type Serializer = Arc<dyn Fn(&dyn RequestBody) -> Result<Vec<u8>, BoxError> + Send + Sync>;

pub type Deserializer =
    Arc<dyn Fn(&[u8], &mut dyn ResponseSlot) -> Result<(), BoxError> + Send + Sync>;

pub fn json_serializer() -> Serializer {
    Arc::new(|body: &dyn RequestBody| -> Result<Vec<u8>, BoxError> { Ok(body.to_json()?) })
}

pub fn json_deserializer() -> Deserializer {
    Arc::new(|data: &[u8], slot: &mut dyn ResponseSlot| -> Result<(), BoxError> {
        Ok(slot.fill_from_json(data)?)
    })
}
