use crate::model::{ForecastSeries, ResolvedCity, WeatherSnapshot};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// Current conditions and multi-day forecasts for a resolved city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &ResolvedCity) -> anyhow::Result<WeatherSnapshot>;

    /// Forecast days of the city, extracted from the provider's nested payload.
    async fn forecast(&self, city: &ResolvedCity, days: u8) -> anyhow::Result<ForecastSeries>;
}

/// Shorten an upstream error body for diagnostics.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundary() {
        let body = "ã".repeat(300);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
