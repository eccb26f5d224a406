use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::PatternError;

/// Numbering-plan and national-ID conventions a pattern set is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    /// Indonesia
    Id,
    /// United States
    Us,
    /// United Kingdom
    Gb,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Id, Locale::Us, Locale::Gb];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Id => "id",
            Locale::Us => "us",
            Locale::Gb => "gb",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = PatternError;

    /// Case-insensitive; accepts region codes and `lang-REGION` tags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "id" | "in" | "id-id" | "indonesia" => Ok(Locale::Id),
            "us" | "en-us" | "usa" => Ok(Locale::Us),
            "gb" | "uk" | "en-gb" => Ok(Locale::Gb),
            _ => Err(PatternError::UnknownLocale(s.to_string())),
        }
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_aliases() {
        assert_eq!("ID".parse::<Locale>().unwrap(), Locale::Id);
        assert_eq!("id_ID".parse::<Locale>().unwrap(), Locale::Id);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::Us);
        assert_eq!("uk".parse::<Locale>().unwrap(), Locale::Gb);
    }

    #[test]
    fn test_unknown_locale() {
        let err = "fr".parse::<Locale>().unwrap_err();
        assert!(matches!(err, PatternError::UnknownLocale(ref l) if l == "fr"));
    }
}
