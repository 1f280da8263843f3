use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    error::{AggregationError, ProviderCall},
    model::{AggregatedResult, FORECAST_DAYS, ResolvedCity},
    provider::WeatherProvider,
};

/// Joins current conditions and the forecast of a resolved city.
#[derive(Debug, Clone)]
pub struct WeatherAggregator {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherAggregator {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Issue both provider calls concurrently; either failing fails the whole
    /// aggregate and the other call is dropped.
    #[instrument(skip(self, city), fields(city = %city.canonical_name, region = %city.region), level = "debug")]
    pub async fn aggregate(&self, city: &ResolvedCity) -> Result<AggregatedResult, AggregationError> {
        let current = async {
            self.provider
                .current(city)
                .await
                .map_err(|err| provider_failure(ProviderCall::Current, err))
        };
        let forecast = async {
            self.provider
                .forecast(city, FORECAST_DAYS)
                .await
                .map_err(|err| provider_failure(ProviderCall::Forecast, err))
        };

        let (current, forecast) = tokio::try_join!(current, forecast)?;

        debug!(days = forecast.len(), "Aggregated weather");
        Ok(AggregatedResult { current, forecast })
    }
}

fn provider_failure(call: ProviderCall, err: anyhow::Error) -> AggregationError {
    AggregationError::ProviderFailure { call, detail: format!("{err:#}") }
}
