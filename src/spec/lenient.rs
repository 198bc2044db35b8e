//! Forgiving deserializers for model-authored JSON.
//!
//! Models drift between strings, numbers, nulls and small objects for the
//! same field. These helpers accept the common shapes instead of failing the
//! whole response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a string, number, boolean or null (as empty) and yields a `String`.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flatten(Value::deserialize(deserializer)?))
}

/// Like [`string`], but null and blank values become `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = flatten(Value::deserialize(deserializer)?);
    Ok(if text.trim().is_empty() { None } else { Some(text) })
}

/// Accepts an array of strings or objects, a single string, or null.
///
/// Objects are reduced to their most descriptive text field.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        other => vec![other],
    };
    Ok(items.into_iter().map(flatten).filter(|s| !s.trim().is_empty()).collect())
}

/// Accepts a number or a numeric string; null, negatives and anything
/// unparseable read as 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f.round() as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(parsed.map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX)))
}

/// Accepts an array of objects, a single object, or null.
///
/// Scalar items are read as text through `T::from`; objects that still fail
/// to deserialize are dropped rather than failing the whole document.
pub fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + From<String>,
{
    let values = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(values) => values,
        other => vec![other],
    };
    Ok(values
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(_) => serde_json::from_value(value).ok(),
            Value::Null => None,
            scalar => Some(flatten(scalar)).filter(|s| !s.trim().is_empty()).map(T::from),
        })
        .collect())
}

/// Field names tried, in order, when an object stands in for a string.
const TEXT_KEYS: &[&str] = &["title", "name", "description", "text", "item", "risk"];

fn flatten(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.into_iter().map(flatten).collect::<Vec<_>>().join("; "),
        Value::Object(map) => TEXT_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| Value::Object(map).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::string")]
        estimate: String,
        #[serde(default, deserialize_with = "super::opt_string")]
        note: Option<String>,
        #[serde(default, deserialize_with = "super::string_list")]
        items: Vec<String>,
        #[serde(default, deserialize_with = "super::number")]
        order: u32,
        #[serde(default, deserialize_with = "super::items")]
        entries: Vec<Entry>,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Entry {
        #[serde(default, deserialize_with = "super::string")]
        text: String,
        #[serde(default, deserialize_with = "super::number")]
        weight: u32,
    }

    impl From<String> for Entry {
        fn from(text: String) -> Self {
            Self { text, weight: 0 }
        }
    }

    fn probe(value: serde_json::Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn numbers_become_strings() {
        assert_eq!(probe(json!({"estimate": 4})).estimate, "4");
        assert_eq!(probe(json!({"estimate": "4h"})).estimate, "4h");
        assert_eq!(probe(json!({"estimate": null})).estimate, "");
    }

    #[test]
    fn blank_optional_is_none() {
        assert!(probe(json!({"note": "  "})).note.is_none());
        assert!(probe(json!({"note": null})).note.is_none());
        assert_eq!(probe(json!({"note": "x"})).note.as_deref(), Some("x"));
    }

    #[test]
    fn list_accepts_objects_and_single_values() {
        let p = probe(json!({"items": [
            "plain",
            {"title": "Write migration", "estimate": "1h"},
            {"risk": "Token expiry", "mitigation": "refresh"},
            ""
        ]}));
        assert_eq!(p.items, vec!["plain", "Write migration", "Token expiry"]);

        assert_eq!(probe(json!({"items": "only one"})).items, vec!["only one"]);
        assert!(probe(json!({"items": null})).items.is_empty());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let p = probe(json!({}));
        assert!(p.estimate.is_empty());
        assert!(p.note.is_none());
        assert!(p.items.is_empty());
        assert_eq!(p.order, 0);
        assert!(p.entries.is_empty());
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        assert_eq!(probe(json!({"order": 3})).order, 3);
        assert_eq!(probe(json!({"order": " 2 "})).order, 2);
        assert_eq!(probe(json!({"order": 2.0})).order, 2);
        assert_eq!(probe(json!({"order": "first"})).order, 0);
        assert_eq!(probe(json!({"order": -1})).order, 0);
        assert_eq!(probe(json!({"order": null})).order, 0);
    }

    #[test]
    fn items_read_scalars_as_text_and_skip_junk() {
        let p = probe(json!({"entries": [
            {"text": "object", "weight": "5"},
            "plain string",
            null,
            7,
            {"text": ["not", "a", "string"], "weight": {"deep": true}}
        ]}));
        assert_eq!(
            p.entries,
            vec![
                Entry { text: "object".into(), weight: 5 },
                Entry { text: "plain string".into(), weight: 0 },
                Entry { text: "7".into(), weight: 0 },
                Entry { text: "not; a; string".into(), weight: 0 },
            ]
        );

        let single = probe(json!({"entries": {"text": "alone"}}));
        assert_eq!(single.entries, vec![Entry { text: "alone".into(), weight: 0 }]);
        assert!(probe(json!({"entries": null})).entries.is_empty());
    }
}
