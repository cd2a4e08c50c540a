//! Tri-state optional parameters.
//!
//! # Design
//! `Option<T>` cannot tell "the caller left this out" from "the caller sent
//! an explicit null", and partial updates need both. `Param<T>` keeps the
//! three states apart as tags of one enum: `NotGiven` is dropped from every
//! query string and JSON body, `Null` is sent as a present-but-null field,
//! and `Value` is sent as is. Whether a parameter is given is decided by the
//! tag alone, so `false`, `0` and `""` are ordinary given values.
//!
//! Struct fields of this type must carry
//! `#[serde(default, skip_serializing_if = "Param::is_not_given")]`. The
//! `Serialize` impl refuses to emit `NotGiven` so a missing attribute shows
//! up as a serialization error instead of a silent `null` on the wire.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, Serializer};

/// An optional parameter that distinguishes "omitted" from "null".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Param<T> {
    /// The caller did not supply the parameter.
    #[default]
    NotGiven,
    /// The caller explicitly supplied null.
    Null,
    /// The caller supplied a value.
    Value(T),
}

impl<T> Param<T> {
    pub fn is_not_given(&self) -> bool {
        matches!(self, Param::NotGiven)
    }

    pub fn is_given(&self) -> bool {
        !self.is_not_given()
    }

    pub fn as_ref(&self) -> Param<&T> {
        match self {
            Param::NotGiven => Param::NotGiven,
            Param::Null => Param::Null,
            Param::Value(v) => Param::Value(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Param<U> {
        match self {
            Param::NotGiven => Param::NotGiven,
            Param::Null => Param::Null,
            Param::Value(v) => Param::Value(f(v)),
        }
    }

    /// `None` when not given, `Some(None)` for an explicit null.
    pub fn given(self) -> Option<Option<T>> {
        match self {
            Param::NotGiven => None,
            Param::Null => Some(None),
            Param::Value(v) => Some(Some(v)),
        }
    }

    /// The value, collapsing both `NotGiven` and `Null` to `None`.
    pub fn value(self) -> Option<T> {
        self.given().flatten()
    }
}

impl<T> From<T> for Param<T> {
    fn from(value: T) -> Self {
        Param::Value(value)
    }
}

impl From<&str> for Param<String> {
    fn from(value: &str) -> Self {
        Param::Value(value.to_string())
    }
}

/// Reads `None` as an explicit null.
impl<T> From<Option<T>> for Param<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Param::Null, Param::Value)
    }
}

impl<T: Serialize> Serialize for Param<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Param::NotGiven => Err(S::Error::custom(
                "a not-given parameter must be skipped, not serialized",
            )),
            Param::Null => serializer.serialize_none(),
            Param::Value(v) => v.serialize(serializer),
        }
    }
}

/// Absent fields fall back to `Default` (`NotGiven`) through `#[serde(default)]`;
/// anything present is either null or a value.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Param<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Param::from)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Patch {
        #[serde(default, skip_serializing_if = "Param::is_not_given")]
        flag: Param<bool>,
        #[serde(default, skip_serializing_if = "Param::is_not_given")]
        count: Param<i64>,
        #[serde(default, skip_serializing_if = "Param::is_not_given")]
        label: Param<String>,
    }

    #[test]
    fn not_given_fields_are_absent() {
        let patch = Patch {
            flag: Param::NotGiven,
            count: Param::NotGiven,
            label: Param::NotGiven,
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({}));
    }

    #[test]
    fn null_fields_are_present() {
        let patch = Patch {
            flag: Param::Null,
            count: Param::NotGiven,
            label: Param::Null,
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"flag": null, "label": null})
        );
    }

    #[test]
    fn falsy_values_are_given() {
        let patch = Patch {
            flag: false.into(),
            count: 0.into(),
            label: "".into(),
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"flag": false, "count": 0, "label": ""})
        );
    }

    #[test]
    fn deserialize_keeps_three_states() {
        let patch: Patch = serde_json::from_value(json!({"flag": null, "count": 3})).unwrap();
        assert_eq!(patch.flag, Param::Null);
        assert_eq!(patch.count, Param::Value(3));
        assert_eq!(patch.label, Param::NotGiven);
    }

    #[test]
    fn bare_not_given_refuses_to_serialize() {
        assert!(serde_json::to_value(Param::<i64>::NotGiven).is_err());
    }

    #[test]
    fn option_conversion_maps_none_to_null() {
        assert_eq!(Param::<i64>::from(None), Param::Null);
        assert_eq!(Param::<i64>::from(Some(4)), Param::Value(4));
        assert_eq!(Param::Value(4).given(), Some(Some(4)));
        assert_eq!(Param::<i64>::Null.given(), Some(None));
        assert_eq!(Param::<i64>::NotGiven.given(), None);
    }
}
