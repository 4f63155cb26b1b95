//! Lenient field decoders.
//!
//! The backend is loose about types: years and ratings show up as numbers or
//! numeric strings, optional text fields arrive as `""` or `null`, booleans
//! are sometimes `null`. Every helper here degrades to `None` (or `false`)
//! instead of failing the whole record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

impl NumberOrText {
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumberOrText::Int(n) => *n as f64,
            NumberOrText::Float(f) => *f,
            NumberOrText::Text(s) => s.trim().parse::<f64>().ok()?,
            NumberOrText::Flag(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// Trims text and maps blank strings to `None`.
///
/// Works for any target constructible from a `String`, so enum-like fields
/// (`Platform`, `Genre`, `Difficulty`) share it with plain text.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(T::from))
}

/// Required text that may come back as `null`; reads as `""`.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(NumberOrText::as_f64))
}

/// Non-negative integers such as release years. Fractions are rounded.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    Ok(value
        .filter(|v| *v >= 0.0 && *v <= u32::MAX as f64)
        .map(|v| v.round() as u32))
}

/// Star ratings, clamped into `0..=5`.
pub fn lenient_stars<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?.unwrap_or(0.0);
    Ok(value.round().clamp(0.0, crate::MAX_RATING as f64) as u8)
}

/// `null`, missing and unparsable values read as `false`.
pub fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrText::Flag(flag)) => flag,
        Some(NumberOrText::Text(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(NumberOrText::Int(n)) => n != 0,
        _ => false,
    })
}

/// RFC 3339 timestamps. Anything else is dropped.
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrText::Text(s)) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(NumberOrText::Int(millis)) => DateTime::from_timestamp_millis(millis),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Debug)]
    struct Lenient {
        #[serde(default, deserialize_with = "lenient_u32")]
        year: Option<u32>,
        #[serde(default, deserialize_with = "lenient_f64")]
        rating: Option<f64>,
        #[serde(default, deserialize_with = "blank_as_none")]
        label: Option<String>,
        #[serde(default, deserialize_with = "null_as_false")]
        done: bool,
        #[serde(default, deserialize_with = "lenient_stars")]
        stars: u8,
        #[serde(default, deserialize_with = "lenient_datetime")]
        at: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "null_as_empty")]
        name: String,
    }

    fn decode(value: serde_json::Value) -> Lenient {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        let p = decode(json!({ "year": "2020", "rating": "4.5" }));
        assert_eq!(p.year, Some(2020));
        assert_eq!(p.rating, Some(4.5));
    }

    #[test]
    fn garbage_numbers_become_none() {
        let p = decode(json!({ "year": "soon", "rating": "n/a" }));
        assert_eq!(p.year, None);
        assert_eq!(p.rating, None);

        let p = decode(json!({ "year": -3 }));
        assert_eq!(p.year, None);
    }

    #[test]
    fn blanks_and_nulls() {
        let p = decode(json!({ "label": "   ", "done": null }));
        assert_eq!(p.label, None);
        assert!(!p.done);

        let p = decode(json!({ "label": "  RPG ", "done": true }));
        assert_eq!(p.label.as_deref(), Some("RPG"));
        assert!(p.done);
    }

    #[test]
    fn null_text_reads_as_empty() {
        assert_eq!(decode(json!({ "name": null })).name, "");
        assert_eq!(decode(json!({ "name": " Ana " })).name, " Ana ");
        assert_eq!(decode(json!({})).name, "");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let p = decode(json!({}));
        assert_eq!(p.year, None);
        assert_eq!(p.stars, 0);
        assert!(p.at.is_none());
    }

    #[test]
    fn stars_are_clamped() {
        assert_eq!(decode(json!({ "stars": 9 })).stars, 5);
        assert_eq!(decode(json!({ "stars": "-2" })).stars, 0);
        assert_eq!(decode(json!({ "stars": 3.6 })).stars, 4);
    }

    #[test]
    fn timestamps() {
        let p = decode(json!({ "at": "2024-03-01T10:00:00.000Z" }));
        assert_eq!(p.at.map(|d| d.timestamp()), Some(1_709_287_200));

        let p = decode(json!({ "at": "yesterday" }));
        assert!(p.at.is_none());
    }
}
