use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::{MunicipalityName, RegionCode};

pub mod ibge;

pub use ibge::IbgeDirectory;

/// Source of the authoritative municipality list of a region.
#[async_trait]
pub trait MunicipalityDirectory: Send + Sync + Debug {
    /// Raw municipality names of `region`, in directory order.
    ///
    /// Transport failures, timeouts, non-success statuses and payloads that do
    /// not match the expected schema are all errors.
    async fn municipalities(&self, region: &RegionCode) -> anyhow::Result<Vec<MunicipalityName>>;
}
