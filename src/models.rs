use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Everything pulled out of one review page, keyed by its URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoeRecord {
    pub url: String,
    pub title: Option<String>,
    pub verdict: Option<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    /// Measured values such as "Heel stack" -> "32 mm".
    #[serde(default)]
    pub lab_results: BTreeMap<String, String>,
    /// Manufacturer-declared values.
    #[serde(default)]
    pub brand_specs: BTreeMap<String, String>,
    pub main_image: Option<String>,
}
