use std::fmt;

/// The two read-only resources the backend passthrough serves, selected by its
/// `type` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    /// The node list (`type=data`).
    Nodes,
    /// The aggregate counters (`type=stats`).
    Stats,
}

impl EndpointKind {
    /// Value of the `type` query parameter.
    #[must_use]
    pub fn as_query(&self) -> &'static str {
        match self {
            EndpointKind::Nodes => "data",
            EndpointKind::Stats => "stats",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}
