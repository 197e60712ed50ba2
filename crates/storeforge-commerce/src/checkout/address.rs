//! Address types.

use serde::{Deserialize, Serialize};

/// A postal address as the checkout form collects it.
///
/// Every field is free text; blank means "not provided".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Company name.
    #[serde(default)]
    pub company: String,
    /// Address line 1.
    pub address1: String,
    /// Address line 2 (apt, suite, etc.).
    #[serde(default)]
    pub address2: String,
    /// City.
    pub city: String,
    /// State/province.
    #[serde(default)]
    pub province: String,
    /// Country.
    pub country: String,
    /// Postal/ZIP code.
    pub postal_code: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
}

impl Address {
    /// Create a new address with the required fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address1: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            address1: address1.into(),
            city: city.into(),
            country: country.into(),
            postal_code: postal_code.into(),
            ..Self::default()
        }
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Format as single line, skipping blank parts.
    pub fn one_line(&self) -> String {
        [
            &self.address1,
            &self.address2,
            &self.city,
            &self.province,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.as_str())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Check if the fields a shipment needs are present.
    pub fn is_complete(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.address1,
            &self.city,
            &self.country,
            &self.postal_code,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}
