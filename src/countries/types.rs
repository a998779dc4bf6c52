//! REST Countries API type definitions
//!
//! These types mirror the REST Countries v3.1 responses and are used for
//! serialization/deserialization. Every field defaults because the API
//! returns only the requested field subset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Common and official names of a country
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CountryName {
    /// Common name (e.g. "France")
    #[serde(default)]
    pub common: String,

    /// Official name (e.g. "French Republic")
    #[serde(default)]
    pub official: String,
}

/// Flag image references
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Flags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A currency entry, keyed by currency code in the parent map
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Currency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// A country record from the full field set
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Country {
    /// Country names
    #[serde(default)]
    pub name: CountryName,

    /// Capital cities
    #[serde(default)]
    pub capital: Vec<String>,

    /// Geographic region (e.g. "Europe")
    #[serde(default)]
    pub region: String,

    /// Population count
    #[serde(default)]
    pub population: u64,

    /// Land area in square kilometers
    #[serde(default)]
    pub area: f64,

    /// Flag images
    #[serde(default)]
    pub flags: Flags,

    /// Languages, keyed by language code
    #[serde(default)]
    pub languages: BTreeMap<String, String>,

    /// Currencies, keyed by currency code
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
}

/// A row from the reduced name/region field set
///
/// Both fields are optional: rows with missing values are dropped during
/// filtering rather than failing the whole response.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegionRow {
    #[serde(default)]
    pub name: Option<CountryName>,

    #[serde(default)]
    pub region: Option<String>,
}
