//! Culture code model
//!
//! A culture code is a `language-region` pair such as `en-us`. Both halves are
//! exactly two ASCII letters. Input is accepted in any case and is always held
//! lowercased, so two `Culture` values compare equal regardless of how they
//! were written in a URL or a config file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::CultureError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Culture {
    code: String,
}

impl Culture {
    /// Parse a culture code, e.g. `"en-US"` -> `en-us`
    pub fn parse(value: &str) -> Result<Self, CultureError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CultureError::missing_argument("culture"));
        }
        if !is_culture_code(value) {
            return Err(CultureError::invalid_culture(value));
        }
        Ok(Self { code: value.to_ascii_lowercase() })
    }

    /// Language half (`en` in `en-us`)
    pub fn language(&self) -> &str {
        &self.code[..2]
    }

    /// Region half (`us` in `en-us`)
    pub fn region(&self) -> &str {
        &self.code[3..]
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// Build from two already-matched halves. Callers guarantee each half is
    /// two ASCII letters.
    pub(crate) fn from_parts(language: &str, region: &str) -> Self {
        debug_assert!(language.len() == 2 && region.len() == 2);
        Self {
            code: format!("{}-{}", language.to_ascii_lowercase(), region.to_ascii_lowercase()),
        }
    }
}

/// `xx-yy` with ASCII letters only
fn is_culture_code(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 5
        && bytes[2] == b'-'
        && bytes[..2].iter().all(u8::is_ascii_alphabetic)
        && bytes[3..].iter().all(u8::is_ascii_alphabetic)
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl FromStr for Culture {
    type Err = CultureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Culture {
    type Error = CultureError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<str> for Culture {
    fn as_ref(&self) -> &str {
        &self.code
    }
}

impl Serialize for Culture {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.code)
    }
}

impl<'de> Deserialize<'de> for Culture {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Culture::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercases() {
        let culture = Culture::parse("EN-us").unwrap();
        assert_eq!(culture.as_str(), "en-us");
        assert_eq!(culture.language(), "en");
        assert_eq!(culture.region(), "us");
        assert_eq!(culture.to_string(), "en-us");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Culture::parse("  es-mx ").unwrap().as_str(), "es-mx");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["eng-us", "e-us", "en-usa", "en_us", "en-12", "enus", "é-us", "en-üs"] {
            match Culture::parse(bad) {
                Err(CultureError::InvalidCulture(value)) => assert_eq!(value, bad),
                other => panic!("expected InvalidCulture for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_parse_empty_is_missing_argument() {
        assert_eq!(Culture::parse("").unwrap_err(), CultureError::missing_argument("culture"));
        assert_eq!(Culture::parse("   ").unwrap_err(), CultureError::missing_argument("culture"));
    }

    #[test]
    fn test_serde_round_trips_as_string() {
        let culture: Culture = serde_json::from_str("\"FR-ca\"").unwrap();
        assert_eq!(culture.as_str(), "fr-ca");
        assert_eq!(serde_json::to_string(&culture).unwrap(), "\"fr-ca\"");

        let err = serde_json::from_str::<Culture>("\"french\"").unwrap_err();
        assert!(err.to_string().contains("Invalid culture code"));
    }
}
