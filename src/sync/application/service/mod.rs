pub mod node_sync_service;
pub mod stats_sync_service;
