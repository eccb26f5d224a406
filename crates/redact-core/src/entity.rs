//! PII categories

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A PII category.
///
/// Internally a closed enum; the SCREAMING_SNAKE_CASE name is only used at
/// the serialization boundary and inside placeholder tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityType {
    PhoneNumber,
    Email,
    CreditCard,
    IdNumber,
    IpAddress,
    Iban,
    Url,
    Person,
    Location,
    Organization,
}

impl EntityType {
    pub const ALL: [EntityType; 10] = [
        EntityType::PhoneNumber,
        EntityType::Email,
        EntityType::CreditCard,
        EntityType::IdNumber,
        EntityType::IpAddress,
        EntityType::Iban,
        EntityType::Url,
        EntityType::Person,
        EntityType::Location,
        EntityType::Organization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::PhoneNumber => "PHONE_NUMBER",
            EntityType::Email => "EMAIL",
            EntityType::CreditCard => "CREDIT_CARD",
            EntityType::IdNumber => "ID_NUMBER",
            EntityType::IpAddress => "IP_ADDRESS",
            EntityType::Iban => "IBAN",
            EntityType::Url => "URL",
            EntityType::Person => "PERSON",
            EntityType::Location => "LOCATION",
            EntityType::Organization => "ORGANIZATION",
        }
    }

    /// Placeholder substituted for a span of this type, e.g. `[EMAIL]`.
    pub fn placeholder(&self) -> String {
        format!("[{}]", self.as_str())
    }

    /// Placeholder carrying a per-request ordinal, e.g. `[PERSON_2]`.
    pub fn numbered_placeholder(&self, ordinal: usize) -> String {
        format!("[{}_{}]", self.as_str(), ordinal)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEntityType(pub String);

impl fmt::Display for UnknownEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entity type: {}", self.0)
    }
}

impl std::error::Error for UnknownEntityType {}

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    /// Accepts canonical names plus the short labels NER models emit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        let entity = match normalized.as_str() {
            "PHONE_NUMBER" | "PHONE" => EntityType::PhoneNumber,
            "EMAIL" | "EMAIL_ADDRESS" => EntityType::Email,
            "CREDIT_CARD" => EntityType::CreditCard,
            "ID_NUMBER" | "NATIONAL_ID" => EntityType::IdNumber,
            "IP_ADDRESS" => EntityType::IpAddress,
            "IBAN" | "IBAN_CODE" => EntityType::Iban,
            "URL" => EntityType::Url,
            "PERSON" | "PER" => EntityType::Person,
            "LOCATION" | "LOC" | "GPE" => EntityType::Location,
            "ORGANIZATION" | "ORG" => EntityType::Organization,
            _ => return Err(UnknownEntityType(s.to_string())),
        };
        Ok(entity)
    }
}

impl Serialize for EntityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
