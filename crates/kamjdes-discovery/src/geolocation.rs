//! Acquiring the user's coordinate before a nearby search.
//!
//! The engine never sees a geolocation failure: callers obtain a coordinate
//! through [`locate`] and only run [`crate::find_nearby`] on success.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use kamjdes_core::Coordinates;

use crate::proximity::is_valid_coordinate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("location access was denied")]
    PermissionDenied,

    #[error("location is unavailable: {0}")]
    Unavailable(String),

    #[error("timed out after {0:?} waiting for a location")]
    Timeout(Duration),
}

/// Platform collaborator that resolves the device's current position.
#[async_trait]
pub trait CoordinateSource: Send + Sync {
    async fn current_coordinate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Serves a coordinate supplied up front, e.g. from command-line flags.
#[derive(Debug, Clone, Copy)]
pub struct FixedCoordinateSource {
    coordinate: Coordinates,
}

impl FixedCoordinateSource {
    #[must_use]
    pub fn new(coordinate: Coordinates) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl CoordinateSource for FixedCoordinateSource {
    async fn current_coordinate(&self) -> Result<Coordinates, GeolocationError> {
        if is_valid_coordinate(self.coordinate) {
            Ok(self.coordinate)
        } else {
            let Coordinates { lat, lng } = self.coordinate;
            Err(GeolocationError::Unavailable(format!(
                "({lat}, {lng}) is not a valid position"
            )))
        }
    }
}

/// Asks `source` for a coordinate, giving up after `timeout`.
///
/// # Errors
///
/// Returns the source's own error, or [`GeolocationError::Timeout`] when no
/// answer arrives in time.
pub async fn locate<S>(source: &S, timeout: Duration) -> Result<Coordinates, GeolocationError>
where
    S: CoordinateSource + ?Sized,
{
    match tokio::time::timeout(timeout, source.current_coordinate()).await {
        Ok(Ok(coordinate)) => {
            tracing::debug!(lat = coordinate.lat, lng = coordinate.lng, "location acquired");
            Ok(coordinate)
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "location request failed");
            Err(e)
        }
        Err(_) => {
            tracing::warn!(timeout_secs = timeout.as_secs(), "location request timed out");
            Err(GeolocationError::Timeout(timeout))
        }
    }
}

/// Ticket handed out by [`RequestGeneration::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Last-request-wins bookkeeping for overlapping location or radius requests.
///
/// Each request takes a ticket when it starts; a response is applied only if
/// no newer request has started since.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    current: AtomicU64,
}

impl RequestGeneration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier one.
    #[must_use]
    pub fn begin(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current.load(Ordering::Acquire) == generation.0
    }

    /// Passes `value` through only if `generation` is still the latest.
    #[must_use]
    pub fn accept<T>(&self, generation: Generation, value: T) -> Option<T> {
        if self.is_current(generation) {
            Some(value)
        } else {
            tracing::debug!(stale = generation.0, "dropping superseded response");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DeniedSource;

    #[async_trait]
    impl CoordinateSource for DeniedSource {
        async fn current_coordinate(&self) -> Result<Coordinates, GeolocationError> {
            Err(GeolocationError::PermissionDenied)
        }
    }

    struct SlowSource {
        delay: Duration,
        coordinate: Coordinates,
    }

    #[async_trait]
    impl CoordinateSource for SlowSource {
        async fn current_coordinate(&self) -> Result<Coordinates, GeolocationError> {
            tokio::time::sleep(self.delay).await;
            Ok(self.coordinate)
        }
    }

    #[tokio::test]
    async fn fixed_source_returns_its_coordinate() {
        let source = FixedCoordinateSource::new(Coordinates::new(50.08, 14.42));
        let got = locate(&source, Duration::from_secs(15)).await.unwrap();
        assert_eq!(got, Coordinates::new(50.08, 14.42));
    }

    #[tokio::test]
    async fn fixed_source_rejects_out_of_range_coordinate() {
        let source = FixedCoordinateSource::new(Coordinates::new(120.0, 14.42));
        let err = locate(&source, Duration::from_secs(15)).await.unwrap_err();
        assert!(matches!(err, GeolocationError::Unavailable(_)));
    }

    #[tokio::test]
    async fn source_error_is_passed_through() {
        let err = locate(&DeniedSource, Duration::from_secs(15)).await.unwrap_err();
        assert_eq!(err, GeolocationError::PermissionDenied);
        assert_eq!(err.to_string(), "location access was denied");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_times_out() {
        let source = SlowSource {
            delay: Duration::from_secs(30),
            coordinate: Coordinates::new(50.0, 14.0),
        };
        let err = locate(&source, Duration::from_secs(15)).await.unwrap_err();
        assert_eq!(err, GeolocationError::Timeout(Duration::from_secs(15)));
    }

    #[tokio::test(start_paused = true)]
    async fn source_answering_in_time_succeeds() {
        let source = SlowSource {
            delay: Duration::from_secs(5),
            coordinate: Coordinates::new(50.0, 14.0),
        };
        assert!(locate(&source, Duration::from_secs(15)).await.is_ok());
    }

    #[tokio::test]
    async fn locate_accepts_trait_objects() {
        let source: Box<dyn CoordinateSource> =
            Box::new(FixedCoordinateSource::new(Coordinates::new(50.0, 14.0)));
        assert!(locate(source.as_ref(), Duration::from_secs(1)).await.is_ok());
    }

    #[test]
    fn newer_request_supersedes_older() {
        let generations = RequestGeneration::new();
        let first = generations.begin();
        assert!(generations.is_current(first));

        let second = generations.begin();
        assert!(!generations.is_current(first));
        assert_eq!(generations.accept(first, "old"), None);
        assert_eq!(generations.accept(second, "new"), Some("new"));
    }
}
