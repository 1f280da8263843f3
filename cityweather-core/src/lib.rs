//! Core library of the `cityweather` service.
//!
//! This crate defines:
//! - City-name normalization and validation against a municipality directory
//! - Aggregation of current conditions and forecast from a weather provider
//! - The typed failure taxonomy and its HTTP mapping
//! - Configuration handling
//!
//! It is used by `cityweather-cli`, which serves the HTTP API and offers one-shot lookups.

pub mod aggregator;
pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod lookup;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod resolver;

pub use aggregator::WeatherAggregator;
pub use config::Config;
pub use directory::{IbgeDirectory, MunicipalityDirectory};
pub use error::{AggregationError, ErrorKind, LookupError, ResolutionError};
pub use lookup::WeatherLookup;
pub use model::{AggregatedResult, RegionCode, ResolvedCity};
pub use provider::{WeatherApiProvider, WeatherProvider};
pub use resolver::CityResolver;
