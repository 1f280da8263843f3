//! HTTP surface of the service.
//!
//! `GET /weather/{city}/{uf}` returns `{"current": ..., "forecast": [...]}` or
//! `{"error": "..."}` with 400 (city not in region) or 500 (anything else).

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::{
    error::{ErrorKind, LookupError},
    lookup::WeatherLookup,
    model::RegionCode,
};

pub const WELCOME_MESSAGE: &str = "Bem-vindo ao servidor!";

pub fn router(lookup: Arc<WeatherLookup>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let weather = Router::new()
        .route("/weather/{city}/{uf}", get(get_weather))
        .layer(cors)
        .with_state(lookup);

    Router::new().route("/", get(home)).merge(weather)
}

async fn home() -> &'static str {
    WELCOME_MESSAGE
}

async fn get_weather(
    State(lookup): State<Arc<WeatherLookup>>,
    Path((city, uf)): Path<(String, String)>,
) -> Response {
    let region = RegionCode::new(uf);

    // A panic inside the pipeline must still produce the unknown-error response.
    let task = tokio::spawn(async move { lookup.lookup(&city, &region).await });
    let outcome = match task.await {
        Ok(outcome) => outcome,
        Err(join_err) => Err(LookupError::Unknown(join_err.to_string())),
    };

    match outcome {
        Ok(result) => Json(result).into_response(),
        Err(err) => err.into_response(),
    }
}

impl LookupError {
    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        match self.kind() {
            ErrorKind::CityNotInRegion => info!("{self}"),
            ErrorKind::DirectoryUnavailable | ErrorKind::ProviderFailure => {
                warn!("Failed to fetch data: {self}")
            }
            ErrorKind::Unknown => error!("Error: {self}"),
        }

        let body = Json(json!({ "error": self.user_message() }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AggregationError, ProviderCall, ResolutionError};

    #[test]
    fn region_mismatch_is_bad_request() {
        let err: LookupError = ResolutionError::CityNotInRegion {
            city: "Paris".into(),
            region: "SP".into(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failures_are_server_errors() {
        let directory: LookupError = ResolutionError::DirectoryUnavailable {
            region: "DF".into(),
            detail: "timeout".into(),
        }
        .into();
        let provider: LookupError = AggregationError::ProviderFailure {
            call: ProviderCall::Current,
            detail: "503".into(),
        }
        .into();

        assert_eq!(directory.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(provider.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            LookupError::Unknown("panic".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
