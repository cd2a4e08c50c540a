//! Conversion of caller-supplied values into wire-ready JSON.
//!
//! A schema type `S` describes the wire form: its serde attributes carry the
//! wire names (`photoUrls`) with the internal names (`photo_urls`) accepted as
//! aliases, literal enums reject unknown members, and `Param` fields drop out
//! when not given. Encoding runs the item through `S` and back out, so plain
//! maps and prebuilt schema values are validated and renamed by one rule.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Validate `item` against schema `S` and return its wire-form JSON.
///
/// `item` may be a value of `S` itself or any serializable structure (a
/// `serde_json` map, a list of such maps, a bare string for a literal enum)
/// shaped like it. A missing required field or a value of the wrong type is
/// a [`ApiError::Validation`].
pub fn to_encodable<S>(item: &impl Serialize) -> Result<Value, ApiError>
where
    S: Serialize + DeserializeOwned,
{
    let raw = serde_json::to_value(item)
        .map_err(|e| ApiError::Validation(format!("cannot serialize value: {e}")))?;
    let schema: S = serde_json::from_value(raw).map_err(|e| {
        ApiError::Validation(format!("value does not match {}: {e}", short_type_name::<S>()))
    })?;
    serde_json::to_value(&schema).map_err(|e| ApiError::Validation(e.to_string()))
}

pub(crate) fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    for (i, segment) in full.split('<').enumerate() {
        if i > 0 {
            out.push('<');
        }
        let mut parts = segment.split(", ").peekable();
        while let Some(part) = parts.next() {
            out.push_str(part.rsplit("::").next().unwrap_or(part));
            if parts.peek().is_some() {
                out.push_str(", ");
            }
        }
    }
    out
}
