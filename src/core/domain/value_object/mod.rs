mod dashboard_url;
mod endpoint_kind;
mod node_timestamp;
mod page_size;
pub(crate) mod serde_helpers;
mod tri_state;
mod uplink;

pub use dashboard_url::DashboardUrl;
pub use endpoint_kind::EndpointKind;
pub use node_timestamp::{EffectiveActivity, NodeTimestamp};
pub use page_size::{PAGE_SIZE_OPTIONS, PageSize};
pub use tri_state::TriState;
pub use uplink::Uplink;

