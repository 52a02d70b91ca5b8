//! Customer region codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A customer's country and, where relevant, state or province.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionCode {
    /// ISO 3166 alpha-2 country code.
    pub country_code: String,
    /// Subdivision code within the country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_province_code: Option<String>,
}

impl RegionCode {
    /// Creates a country-level region code.
    pub fn country(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            state_province_code: None,
        }
    }

    /// Narrows the region to a state or province.
    #[must_use]
    pub fn with_state_province(mut self, code: impl Into<String>) -> Self {
        self.state_province_code = Some(code.into());
        self
    }

    /// Returns the support-tree region key, `CC` or `CC:SP`.
    #[must_use]
    pub fn region_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state_province_code {
            Some(state) => write!(f, "{}:{state}", self.country_code),
            None => f.write_str(&self.country_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_key() {
        assert_eq!(RegionCode::country("GB").region_key(), "GB");
        assert_eq!(
            RegionCode::country("US").with_state_province("CA").region_key(),
            "US:CA"
        );
    }

    #[test]
    fn test_region_code_serde() {
        let region: RegionCode =
            serde_json::from_str(r#"{"countryCode":"US","stateProvinceCode":"FL"}"#).unwrap();
        assert_eq!(region.region_key(), "US:FL");
        assert_eq!(
            serde_json::to_string(&RegionCode::country("IT")).unwrap(),
            r#"{"countryCode":"IT"}"#
        );
    }
}
