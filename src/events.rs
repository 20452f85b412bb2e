use crate::error::FitError;

/// Outcome of one capability query, tagged with the connection it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityEvent {
    pub generation: u64,
    pub outcome: Result<Vec<String>, FitError>,
}
