use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    directory::MunicipalityDirectory,
    error::ResolutionError,
    model::{RegionCode, ResolvedCity},
    normalize::{canonicalize, title_case},
};

/// Checks that a city belongs to a region's municipality directory.
#[derive(Debug, Clone)]
pub struct CityResolver {
    directory: Arc<dyn MunicipalityDirectory>,
}

impl CityResolver {
    pub fn new(directory: Arc<dyn MunicipalityDirectory>) -> Self {
        Self { directory }
    }

    /// Fetch the directory of `region` and look for an entry whose canonical
    /// form equals the canonical form of `city_raw`.
    ///
    /// The directory is fetched once per call and never retried.
    #[instrument(skip(self), level = "debug")]
    pub async fn resolve(
        &self,
        city_raw: &str,
        region: &RegionCode,
    ) -> Result<ResolvedCity, ResolutionError> {
        let names = self.directory.municipalities(region).await.map_err(|err| {
            ResolutionError::DirectoryUnavailable {
                region: region.clone(),
                detail: format!("{err:#}"),
            }
        })?;

        let wanted = canonicalize(city_raw);
        // Empty input is rejected outright, even against an empty directory entry.
        let matched = !wanted.is_empty() && names.iter().any(|name| canonicalize(name) == wanted);

        if !matched {
            debug!(%region, city = %wanted, entries = names.len(), "No directory entry matched");
            return Err(ResolutionError::CityNotInRegion {
                city: city_raw.to_string(),
                region: region.clone(),
            });
        }

        Ok(ResolvedCity {
            canonical_name: wanted,
            display_name: title_case(city_raw),
            region: region.clone(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;

    use crate::model::MunicipalityName;

    /// In-memory directory returning the same list for every region.
    #[derive(Debug)]
    pub(crate) struct StaticDirectory(pub Vec<&'static str>);

    #[async_trait]
    impl MunicipalityDirectory for StaticDirectory {
        async fn municipalities(
            &self,
            _region: &RegionCode,
        ) -> anyhow::Result<Vec<MunicipalityName>> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    #[derive(Debug)]
    struct FailingDirectory;

    #[async_trait]
    impl MunicipalityDirectory for FailingDirectory {
        async fn municipalities(
            &self,
            _region: &RegionCode,
        ) -> anyhow::Result<Vec<MunicipalityName>> {
            Err(anyhow!("connection refused"))
        }
    }

    fn resolver(names: Vec<&'static str>) -> CityResolver {
        CityResolver::new(Arc::new(StaticDirectory(names)))
    }

    #[tokio::test]
    async fn matches_ignoring_accents_and_case() {
        let resolver = resolver(vec!["Sao Paulo", "Campinas"]);

        let city = resolver.resolve("säo paulo", &"SP".into()).await.expect("resolves");

        assert_eq!(city.canonical_name, "sao paulo");
        assert_eq!(city.display_name, "Sao Paulo");
        assert_eq!(city.region, RegionCode::new("SP"));
    }

    #[tokio::test]
    async fn matches_accented_directory_entries() {
        let resolver = resolver(vec!["Brasília"]);

        let city = resolver.resolve("BRASILIA", &"DF".into()).await.expect("resolves");
        assert_eq!(city.canonical_name, "brasilia");
    }

    #[tokio::test]
    async fn rejects_city_of_another_region() {
        let resolver = resolver(vec!["Sao Paulo", "Campinas"]);

        let err = resolver.resolve("Rio de Janeiro", &"SP".into()).await.unwrap_err();
        assert!(matches!(err, ResolutionError::CityNotInRegion { .. }));
    }

    #[tokio::test]
    async fn prefixes_do_not_match() {
        let resolver = resolver(vec!["Sao Paulo"]);

        let err = resolver.resolve("Sao", &"SP".into()).await.unwrap_err();
        assert!(matches!(err, ResolutionError::CityNotInRegion { .. }));
    }

    #[tokio::test]
    async fn empty_city_never_matches() {
        let resolver = resolver(vec!["Sao Paulo"]);

        let err = resolver.resolve("   ", &"SP".into()).await.unwrap_err();
        assert!(matches!(err, ResolutionError::CityNotInRegion { .. }));
    }

    #[tokio::test]
    async fn duplicate_canonical_entries_still_resolve() {
        let resolver = resolver(vec!["Bom Jesus", "Bom Jesús"]);

        let city = resolver.resolve("bom jesus", &"PI".into()).await.expect("resolves");
        assert_eq!(city.canonical_name, "bom jesus");
    }

    #[tokio::test]
    async fn directory_failure_is_reported_as_unavailable() {
        let resolver = CityResolver::new(Arc::new(FailingDirectory));

        let err = resolver.resolve("Campinas", &"SP".into()).await.unwrap_err();
        match err {
            ResolutionError::DirectoryUnavailable { region, detail } => {
                assert_eq!(region.as_str(), "SP");
                assert!(detail.contains("connection refused"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
