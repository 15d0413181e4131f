//! Lenient deserializers for provider fields whose JSON type isn't stable.
//!
//! Discogs sends ids as integers, search-result years as strings and detail
//! years as integers (with `0` meaning unknown). These helpers coerce all of
//! that into the one type our DTOs store.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Unsigned(n) => n.to_string(),
            Self::Signed(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
        }
    }
}

/// Deserialize an identifier that may be a string or a number into a `String`
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

/// Deserialize a year given as `1973`, `"1973"`, `0`, `""` or `null`.
///
/// Zero and empty strings mean "unknown" and become `None`.
pub fn opt_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        let year = match v {
            StringOrNumber::String(s) => s.trim().get(..4).and_then(|y| y.parse().ok()),
            StringOrNumber::Unsigned(n) => i32::try_from(n).ok(),
            StringOrNumber::Signed(n) => i32::try_from(n).ok(),
            StringOrNumber::Float(n) => Some(n as i32),
        };
        year.filter(|y| *y > 0)
    }))
}

/// Deserialize a count that may be sent as a number or a numeric string
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(match value {
        Some(StringOrNumber::Unsigned(n)) => n,
        Some(StringOrNumber::Signed(n)) => u64::try_from(n).unwrap_or(0),
        Some(StringOrNumber::Float(n)) if n > 0.0 => n as u64,
        Some(StringOrNumber::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Deserialize `null` as the type's default (serde's `default` only covers missing keys)
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
