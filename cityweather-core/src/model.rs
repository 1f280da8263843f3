use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of forecast days requested from the weather provider.
pub const FORECAST_DAYS: u8 = 3;

/// Raw municipality label, as sent by a client or returned by the directory.
pub type MunicipalityName = String;

/// Current-conditions payload, passed through untouched.
pub type WeatherSnapshot = serde_json::Value;

/// Per-day forecast entries, passed through untouched.
pub type ForecastSeries = Vec<serde_json::Value>;

/// First-level administrative division code (e.g. "SP", "DF").
///
/// Opaque to this crate: whether a code exists is decided by the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A city that was found in the directory of its region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCity {
    /// Diacritic-folded, lowercased name; this is what the weather provider is queried with.
    pub canonical_name: String,
    /// Title-cased name for logs and terminal output.
    pub display_name: String,
    pub region: RegionCode,
}

impl ResolvedCity {
    /// Provider query string, `"{canonical_name},{region}"`.
    pub fn query(&self) -> String {
        format!("{},{}", self.canonical_name, self.region)
    }
}

/// Combined response returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResult {
    pub current: WeatherSnapshot,
    pub forecast: ForecastSeries,
}
