use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::Config,
    model::{ForecastSeries, ResolvedCity, WeatherSnapshot},
};

use super::{WeatherProvider, truncate_body};

/// WeatherAPI.com client (`current.json`, `forecast.json`).
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    language: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        language: impl Into<String>,
        http: Client,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            language: language.into(),
            http,
        }
    }

    /// Build from config; fails when no API key is configured.
    pub fn from_config(config: &Config, http: Client) -> Result<Self> {
        let api_key = config.require_api_key()?;
        Ok(Self::new(api_key, &config.weather_url, &config.language, http))
    }

    /// GET `{base_url}/{endpoint}` and return the body of a successful response.
    async fn fetch(
        &self,
        endpoint: &str,
        city: &ResolvedCity,
        extra: &[(&str, String)],
        label: &str,
    ) -> Result<String> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);
        let query = city.query();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query.as_str()),
                ("lang", self.language.as_str()),
            ])
            .query(extra)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to send request to WeatherAPI.com ({label})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to read WeatherAPI {label} response body"))?;

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "WeatherAPI {} request failed with status {}: {}",
                label,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: ForecastSeries,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    forecast: WaForecast,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, city: &ResolvedCity) -> Result<WeatherSnapshot> {
        let body = self.fetch("current.json", city, &[], "current").await?;

        serde_json::from_str(&body).context("Failed to parse WeatherAPI current JSON")
    }

    async fn forecast(&self, city: &ResolvedCity, days: u8) -> Result<ForecastSeries> {
        let body = self
            .fetch("forecast.json", city, &[("days", days.to_string())], "forecast")
            .await?;

        let parsed: WaForecastResponse =
            serde_json::from_str(&body).context("Failed to parse WeatherAPI forecast JSON")?;

        Ok(parsed.forecast.forecastday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_config_requires_api_key() {
        let err = WeatherApiProvider::from_config(&Config::default(), Client::new()).unwrap_err();
        assert!(err.to_string().contains("No weather API key configured"));
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_api_key() {
        let provider =
            WeatherApiProvider::new("SUPERSECRET", "http://127.0.0.1:1/v1", "pt", Client::new());
        let city = ResolvedCity {
            canonical_name: "brasilia".into(),
            display_name: "Brasilia".into(),
            region: "DF".into(),
        };

        let err = provider.forecast(&city, 3).await.unwrap_err();
        let text = format!("{err:#} {err:?}");
        assert!(text.contains("forecast"));
        assert!(!text.contains("SUPERSECRET"), "key leaked: {text}");

        let err = provider.current(&city).await.unwrap_err();
        assert!(!format!("{err:#} {err:?}").contains("SUPERSECRET"));
    }

    #[test]
    fn forecast_days_are_extracted_verbatim() {
        let body = json!({
            "location": { "name": "Brasilia" },
            "forecast": { "forecastday": [
                { "date": "2026-10-18", "day": { "maxtemp_c": 31.2 } },
                { "date": "2026-10-19", "day": { "maxtemp_c": 29.8 } },
            ] }
        });

        let parsed: WaForecastResponse = serde_json::from_value(body).expect("parse");
        assert_eq!(parsed.forecast.forecastday.len(), 2);
        assert_eq!(parsed.forecast.forecastday[1]["day"]["maxtemp_c"], json!(29.8));
    }

    #[test]
    fn forecast_without_days_is_malformed() {
        let body = json!({ "forecast": {} });
        assert!(serde_json::from_value::<WaForecastResponse>(body).is_err());
    }
}
