use crate::{
    core::{
        domain::{
            error::DashboardResult, model::node_record::NodeRecord, value_object::EndpointKind,
        },
        infrastructure::source::DashboardSource,
    },
    sync::application::response::node_response::NodeResponse,
};
use tracing::debug;

/// Fetch-and-normalize half of the node flow.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeSyncService;

impl NodeSyncService {
    pub fn new() -> Self {
        Self
    }

    /// Fetches the node list. Malformed elements are dropped, not fatal.
    ///
    /// # Errors
    /// Propagates transport and backend errors from the source, and returns
    /// `DashboardError::Payload` when the body is not a list.
    pub async fn execute<S>(&self, source: &S) -> DashboardResult<Vec<NodeRecord>>
    where
        S: DashboardSource + ?Sized,
    {
        let body = source.fetch(EndpointKind::Nodes).await?;
        let response = NodeResponse::from_value(body)?;
        debug!(
            nodes = response.records.len(),
            skipped = response.skipped,
            "fetched node list"
        );
        Ok(response.records)
    }
}
