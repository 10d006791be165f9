use crate::{
    core::{
        domain::{
            error::DashboardResult, model::stats_snapshot::StatsSnapshot,
            value_object::EndpointKind,
        },
        infrastructure::source::DashboardSource,
    },
    sync::application::response::stats_response::StatsResponse,
};

/// Fetch-and-normalize half of the stats flow.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatsSyncService;

impl StatsSyncService {
    pub fn new() -> Self {
        Self
    }

    /// Fetches the stats endpoint and returns the normalized snapshot.
    ///
    /// # Errors
    /// Propagates transport and backend errors from the source, and returns
    /// `DashboardError::Payload` for a body of the wrong shape.
    pub async fn execute<S>(&self, source: &S) -> DashboardResult<StatsSnapshot>
    where
        S: DashboardSource + ?Sized,
    {
        let body = source.fetch(EndpointKind::Stats).await?;
        StatsResponse::from_value(body)?.into_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        domain::error::DashboardError, infrastructure::source::MockDashboardSource,
    };
    use reqwest::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_execute_normalizes_list_body() {
        let mut source = MockDashboardSource::new();
        source
            .expect_fetch()
            .withf(|kind| *kind == EndpointKind::Stats)
            .times(1)
            .returning(|_| Ok(json!([{ "active_total": 10, "v2ray": 6, "wireguard": 4 }])));

        let stats = StatsSyncService::new().execute(&source).await.unwrap();
        assert_eq!(stats.active_total, 10);
        assert_eq!(stats.v2ray, 6);
        assert_eq!(stats.wireguard, 4);
    }

    #[tokio::test]
    async fn test_execute_propagates_backend_error() {
        let mut source = MockDashboardSource::new();
        source.expect_fetch().returning(|_| {
            Err(DashboardError::Backend {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to fetch data".to_string(),
            })
        });

        let result = StatsSyncService::new().execute(&source).await;
        assert!(matches!(result, Err(DashboardError::Backend { .. })));
    }
}
