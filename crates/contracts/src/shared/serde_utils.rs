//! Deserialization helpers for loosely typed backend payloads

use serde::{Deserialize, Deserializer};

/// Accepts a JSON number, a numeric string, or null/absent.
/// Anything else (including non-numeric strings) becomes `None`.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "lenient_number")]
        value: Option<f64>,
    }

    fn parse(json: &str) -> Option<f64> {
        serde_json::from_str::<Holder>(json).unwrap().value
    }

    #[test]
    fn test_lenient_number() {
        assert_eq!(parse(r#"{"value": 3.5}"#), Some(3.5));
        assert_eq!(parse(r#"{"value": " 42 "}"#), Some(42.0));
        assert_eq!(parse(r#"{"value": "abc"}"#), None);
        assert_eq!(parse(r#"{"value": null}"#), None);
        assert_eq!(parse(r#"{}"#), None);
        assert_eq!(parse(r#"{"value": true}"#), None);
    }
}
