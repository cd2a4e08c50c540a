//! Query-string parameter encoding.
//!
//! Values arrive as JSON (the output of [`to_encodable`](crate::encode::to_encodable))
//! and are flattened into ordered `(name, value)` pairs following the OpenAPI
//! serialization rules for `in: query` parameters.

use serde_json::Value;

/// Ordered multi-map of query pairs. Repeated names are kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == name)
    }

    /// All values recorded under `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// OpenAPI query serialization style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStyle {
    #[default]
    Form,
    SpaceDelimited,
    PipeDelimited,
    DeepObject,
}

impl QueryStyle {
    fn separator(self) -> &'static str {
        match self {
            QueryStyle::Form | QueryStyle::DeepObject => ",",
            QueryStyle::SpaceDelimited => " ",
            QueryStyle::PipeDelimited => "|",
        }
    }
}

/// Append `value` under `name` to `target`.
///
/// - Scalars become one pair; booleans render as `true`/`false`.
/// - Null becomes one pair with an empty value.
/// - Arrays with `explode` repeat the name per element; without it the
///   elements are joined with the style's separator.
/// - Objects with `Form` + `explode` spread their keys as top-level names,
///   with `DeepObject` they become `name[key]`; otherwise keys and values
///   alternate in one joined pair.
pub fn encode_query_param(
    target: &mut QueryParams,
    name: &str,
    value: &Value,
    style: QueryStyle,
    explode: bool,
) {
    match value {
        Value::Array(items) if explode => {
            for item in items {
                target.push(name, scalar_text(item));
            }
        }
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(scalar_text)
                .collect::<Vec<_>>()
                .join(style.separator());
            target.push(name, joined);
        }
        Value::Object(fields) => match (style, explode) {
            (QueryStyle::DeepObject, _) => {
                for (key, field) in fields {
                    target.push(format!("{name}[{key}]"), scalar_text(field));
                }
            }
            (_, true) => {
                for (key, field) in fields {
                    target.push(key.as_str(), scalar_text(field));
                }
            }
            (_, false) => {
                let joined = fields
                    .iter()
                    .flat_map(|(key, field)| [key.clone(), scalar_text(field)])
                    .collect::<Vec<_>>()
                    .join(style.separator());
                target.push(name, joined);
            }
        },
        scalar => target.push(name, scalar_text(scalar)),
    }
}

/// Canonical text of a value nested inside a query parameter.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        nested => nested.to_string(),
    }
}
