use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiscoveryError {
    #[error("search radius must be a positive number of kilometres, got {0}")]
    InvalidRadius(f64),

    #[error("invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },
}
