use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names that can supply the headword, in lookup order.
pub const HEAD_FIELDS: &[&str] = &["head", "key"];

/// Field names that can supply the gloss, in lookup order.
pub const GLOSS_FIELDS: &[&str] = &["gloss", "meaning", "value"];

/// A single lexicon entry.
///
/// `head` and `gloss` are extracted from the raw structured value through an
/// ordered alias chain; everything else is kept verbatim in `meta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Raw headword, as found in the source file.
    pub head: String,
    /// Definition text. Empty when the entry carries none.
    pub gloss: String,
    /// Source-specific attributes (grammar tags, etymology, ...).
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl Record {
    /// Create a record with no metadata.
    pub fn new(head: impl Into<String>, gloss: impl Into<String>) -> Self {
        Record {
            head: head.into(),
            gloss: gloss.into(),
            meta: Map::new(),
        }
    }

    /// Add a metadata field.
    pub fn with_meta(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(name.into(), value.into());
        self
    }

    /// Build a record from an arbitrary decoded value.
    ///
    /// Anything that is not a JSON object yields an empty record, which never
    /// matches a lookup.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_object(map),
            _ => Record::default(),
        }
    }

    fn from_object(mut map: Map<String, Value>) -> Self {
        let head = take_first(&map, HEAD_FIELDS);
        let gloss = take_first(&map, GLOSS_FIELDS);

        map.remove("head");
        map.remove("gloss");
        for (field, _) in head.iter().chain(gloss.iter()) {
            map.remove(*field);
        }

        Record {
            head: head.map(|(_, text)| text).unwrap_or_default(),
            gloss: gloss.map(|(_, text)| text).unwrap_or_default(),
            meta: map,
        }
    }
}

/// Return the first alias whose value is truthy, with its text rendering.
fn take_first(
    map: &Map<String, Value>,
    fields: &[&'static str],
) -> Option<(&'static str, String)> {
    fields.iter().find_map(|field| {
        map.get(*field)
            .and_then(value_text)
            .map(|text| (*field, text))
    })
}

/// Render a value as text, or `None` when it is falsy.
///
/// Falsy means `null`, `false`, zero, or an empty string/array/object.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                None
            } else {
                Some(n.to_string())
            }
        }
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        other => Some(other.to_string()),
    }
}
