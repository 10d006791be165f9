//! The fetch seam between the sync flows and the backend.

use crate::core::domain::{error::DashboardResult, value_object::EndpointKind};
use async_trait::async_trait;

/// Anything that can hand back the raw JSON of the two backend resources.
///
/// Payload normalization is left to the sync services, so implementations
/// only deal with transport and backend-reported errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Fetches one resource and returns its JSON body verbatim.
    async fn fetch(&self, kind: EndpointKind) -> DashboardResult<serde_json::Value>;
}
