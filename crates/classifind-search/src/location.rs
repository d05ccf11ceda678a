//! Device position providers for GPS search.

use std::future::Future;

use classifind_core::GeoPoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
}

/// Source of the device's current position.
///
/// The engine makes a single attempt per GPS search and bounds it with its
/// own timeout, so implementations need not time out themselves.
pub trait DeviceLocator: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<GeoPoint, LocationError>> + Send;
}

/// A locator that always reports the same position, e.g. coordinates given
/// on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    point: GeoPoint,
}

impl FixedLocator {
    #[must_use]
    pub fn new(point: GeoPoint) -> Self {
        Self { point }
    }
}

impl DeviceLocator for FixedLocator {
    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        Ok(self.point)
    }
}
