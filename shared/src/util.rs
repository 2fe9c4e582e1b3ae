use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Trimmed value, `None` when blank
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Deserialize an optional scalar from a string, treating blank as absent.
///
/// Search forms submit every field, so `?employee_id=` means "no filter".
/// Use together with `#[serde(default)]`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match non_blank(raw.as_deref()) {
        None => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Debug, Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "empty_as_none")]
        id: Option<i64>,
        #[serde(default, deserialize_with = "empty_as_none")]
        from: Option<NaiveDate>,
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ana ")), Some("ana"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_empty_as_none() {
        let f: Filter = serde_json::from_str(r#"{"id": "", "from": " "}"#).unwrap();
        assert_eq!(f.id, None);
        assert_eq!(f.from, None);

        let f: Filter = serde_json::from_str(r#"{"id": "42", "from": "2024-03-01"}"#).unwrap();
        assert_eq!(f.id, Some(42));
        assert_eq!(f.from, NaiveDate::from_ymd_opt(2024, 3, 1));

        let f: Filter = serde_json::from_str("{}").unwrap();
        assert_eq!(f.id, None);

        assert!(serde_json::from_str::<Filter>(r#"{"id": "abc"}"#).is_err());
    }
}
