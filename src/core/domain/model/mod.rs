pub mod dashboard_config;
pub mod node_record;
pub mod stats_snapshot;
pub mod view_state;
