use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{info, instrument};

use crate::{
    aggregator::WeatherAggregator,
    config::Config,
    directory::IbgeDirectory,
    error::LookupError,
    model::{AggregatedResult, RegionCode},
    provider::WeatherApiProvider,
    resolver::CityResolver,
};

/// Request pipeline: resolve the city, then aggregate its weather.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    resolver: CityResolver,
    aggregator: WeatherAggregator,
}

impl WeatherLookup {
    pub fn new(resolver: CityResolver, aggregator: WeatherAggregator) -> Self {
        Self { resolver, aggregator }
    }

    /// Wire the IBGE directory and WeatherAPI.com provider from config.
    ///
    /// Both share one HTTP client whose timeout bounds every outbound call.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("cityweather/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let directory = IbgeDirectory::new(&config.directory_url, http.clone());
        let provider = WeatherApiProvider::from_config(config, http)?;

        Ok(Self::new(
            CityResolver::new(Arc::new(directory)),
            WeatherAggregator::new(Arc::new(provider)),
        ))
    }

    /// Aggregation is only attempted after a successful resolution.
    #[instrument(skip(self), level = "debug")]
    pub async fn lookup(
        &self,
        city_raw: &str,
        region: &RegionCode,
    ) -> Result<AggregatedResult, LookupError> {
        let city = self.resolver.resolve(city_raw, region).await?;
        info!(city = %city.display_name, %region, "City resolved");

        Ok(self.aggregator.aggregate(&city).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use crate::{
        aggregator::tests::FakeProvider, error::ErrorKind, resolver::tests::StaticDirectory,
    };

    fn lookup(names: Vec<&'static str>, provider: Arc<FakeProvider>) -> WeatherLookup {
        WeatherLookup::new(
            CityResolver::new(Arc::new(StaticDirectory(names))),
            WeatherAggregator::new(provider),
        )
    }

    #[tokio::test]
    async fn resolved_city_gets_combined_weather() {
        let provider = Arc::new(FakeProvider::default());
        let lookup = lookup(vec!["Brasília"], provider);

        let result = lookup.lookup("brasília", &"DF".into()).await.expect("lookup");
        assert_eq!(result.forecast.len(), 3);
    }

    #[tokio::test]
    async fn rejected_city_never_reaches_the_provider() {
        let provider = Arc::new(FakeProvider::default());
        let lookup = lookup(vec!["Sao Paulo", "Campinas"], provider.clone());

        let err = lookup.lookup("Paris", &"SP".into()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CityNotInRegion);
        assert_eq!(provider.requested_days.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_failure_is_typed() {
        let provider = Arc::new(FakeProvider {
            fail_current: true,
            ..FakeProvider::default()
        });
        let lookup = lookup(vec!["Campinas"], provider);

        let err = lookup.lookup("campinas", &"SP".into()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProviderFailure);
    }

    #[test]
    fn from_config_needs_api_key() {
        let err = WeatherLookup::from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No weather API key configured"));
    }
}
