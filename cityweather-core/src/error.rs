//! Failure taxonomy of the lookup pipeline.

use std::fmt;
use thiserror::Error;

use crate::model::RegionCode;

/// Failures of [`CityResolver::resolve`](crate::resolver::CityResolver::resolve).
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("Municipality directory unavailable for region {region}: {detail}")]
    DirectoryUnavailable { region: RegionCode, detail: String },

    #[error("City '{city}' is not a municipality of region {region}")]
    CityNotInRegion { city: String, region: RegionCode },
}

/// Which provider request failed. Diagnostic only; clients never see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderCall {
    Current,
    Forecast,
}

impl fmt::Display for ProviderCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderCall::Current => "current conditions",
            ProviderCall::Forecast => "forecast",
        })
    }
}

/// Failures of [`WeatherAggregator::aggregate`](crate::aggregator::WeatherAggregator::aggregate).
#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Weather provider {call} request failed: {detail}")]
    ProviderFailure { call: ProviderCall, detail: String },
}

/// Category of a [`LookupError`], one per client-visible outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DirectoryUnavailable,
    CityNotInRegion,
    ProviderFailure,
    Unknown,
}

/// Everything that can stop a request before a combined result is produced.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error("Unexpected failure: {0}")]
    Unknown(String),
}

pub const CITY_NOT_IN_REGION_MESSAGE: &str = "A cidade não corresponde à UF fornecida.";
pub const FETCH_FAILURE_MESSAGE: &str = "Erro ao buscar dados da API de clima";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Erro desconhecido";

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Resolution(ResolutionError::DirectoryUnavailable { .. }) => {
                ErrorKind::DirectoryUnavailable
            }
            Self::Resolution(ResolutionError::CityNotInRegion { .. }) => ErrorKind::CityNotInRegion,
            Self::Aggregation(AggregationError::ProviderFailure { .. }) => ErrorKind::ProviderFailure,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Message safe to show to clients. Never contains transport or parse detail.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::CityNotInRegion => CITY_NOT_IN_REGION_MESSAGE,
            ErrorKind::DirectoryUnavailable | ErrorKind::ProviderFailure => FETCH_FAILURE_MESSAGE,
            ErrorKind::Unknown => UNKNOWN_ERROR_MESSAGE,
        }
    }

    /// Whether the request itself was at fault rather than the service or its upstreams.
    pub fn is_client_error(&self) -> bool {
        self.kind() == ErrorKind::CityNotInRegion
    }
}
