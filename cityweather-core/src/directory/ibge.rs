use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    model::{MunicipalityName, RegionCode},
    provider::truncate_body,
};

use super::MunicipalityDirectory;

/// IBGE localities API (`/localidades/estados/{uf}/municipios`).
#[derive(Debug, Clone)]
pub struct IbgeDirectory {
    base_url: String,
    http: Client,
}

impl IbgeDirectory {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self { base_url: base_url.into(), http }
    }

    fn municipalities_url(&self, region: &RegionCode) -> String {
        format!(
            "{}/localidades/estados/{}/municipios",
            self.base_url.trim_end_matches('/'),
            region
        )
    }
}

/// Only `nome` is read; IBGE sends a lot more per record.
#[derive(Debug, Deserialize)]
struct IbgeMunicipality {
    nome: String,
}

#[async_trait]
impl MunicipalityDirectory for IbgeDirectory {
    async fn municipalities(&self, region: &RegionCode) -> Result<Vec<MunicipalityName>> {
        let url = self.municipalities_url(region);

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to send request to IBGE (municipalities of {region})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read IBGE municipalities response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "IBGE municipalities request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: Vec<IbgeMunicipality> =
            serde_json::from_str(&body).context("Failed to parse IBGE municipalities JSON")?;

        debug!(%region, count = parsed.len(), "Fetched municipality directory");

        Ok(parsed.into_iter().map(|m| m.nome).collect())
    }
}
