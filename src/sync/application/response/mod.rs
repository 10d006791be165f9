pub mod node_response;
pub mod stats_response;
