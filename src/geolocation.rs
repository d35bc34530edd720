//! # Geolocation
//!
//! Bookkeeping for "locate me" requests.
//!
//! The platform position lookup is asynchronous and cannot be cancelled, so a
//! user may fire several requests before the first one answers. Each request
//! gets a sequence number; only the most recently issued request may update
//! the current position, everything older is discarded as stale. A position
//! that arrives after the timeout counts as a timeout failure.
//!
//! With the `async` feature, [`request_position`] enforces the timeout on a
//! position future directly.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::GeolocationError;
use crate::GeoPoint;

/// Configuration for geolocation requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeolocationConfig {
    /// How long to wait for a position, in milliseconds.
    /// Default: 10000
    pub timeout_ms: u64,
}

impl GeolocationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

/// Handle for an issued position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocateRequest {
    seq: u64,
    issued_at: Instant,
}

impl LocateRequest {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn issued_at(&self) -> Instant {
        self.issued_at
    }
}

/// What happened to a completed request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocateResolution {
    /// Newest request succeeded; the position is now current
    Located(GeoPoint),
    /// Newest request failed; the current position is unchanged
    Failed(GeolocationError),
    /// A newer request was issued, or this one was already resolved
    Stale,
}

/// Tracks issued requests and the last known position.
#[derive(Debug, Clone)]
pub struct Geolocator {
    config: GeolocationConfig,
    next_seq: u64,
    pending: Option<u64>,
    position: Option<GeoPoint>,
}

impl Default for Geolocator {
    fn default() -> Self {
        Self::new(GeolocationConfig::default())
    }
}

impl Geolocator {
    pub fn new(config: GeolocationConfig) -> Self {
        Self {
            config,
            next_seq: 1,
            pending: None,
            position: None,
        }
    }

    /// Issue a new request. Any earlier unresolved request becomes stale.
    pub fn begin(&mut self) -> LocateRequest {
        self.begin_at(Instant::now())
    }

    /// [`Geolocator::begin`] with an explicit issue time.
    pub fn begin_at(&mut self, now: Instant) -> LocateRequest {
        let seq = self.next_seq;
        self.next_seq += 1;
        if let Some(previous) = self.pending.replace(seq) {
            debug!("[geolocation] Request {} superseded by {}", previous, seq);
        }
        LocateRequest {
            seq,
            issued_at: now,
        }
    }

    /// Accept the platform's answer for a request.
    pub fn resolve(
        &mut self,
        request: &LocateRequest,
        result: std::result::Result<GeoPoint, GeolocationError>,
    ) -> LocateResolution {
        self.resolve_at(request, result, Instant::now())
    }

    /// [`Geolocator::resolve`] with an explicit arrival time.
    pub fn resolve_at(
        &mut self,
        request: &LocateRequest,
        result: std::result::Result<GeoPoint, GeolocationError>,
        now: Instant,
    ) -> LocateResolution {
        if self.pending != Some(request.seq) {
            debug!("[geolocation] Discarding stale response {}", request.seq);
            return LocateResolution::Stale;
        }
        self.pending = None;

        let elapsed = now.saturating_duration_since(request.issued_at);
        let result = match result {
            Ok(_) if elapsed > self.config.timeout() => Err(GeolocationError::Timeout),
            Ok(point) if !point.is_valid() => Err(GeolocationError::Unavailable),
            other => other,
        };

        match result {
            Ok(point) => {
                info!(
                    "[geolocation] Located ({:.5}, {:.5}) in {} ms",
                    point.lat,
                    point.lng,
                    elapsed.as_millis()
                );
                self.position = Some(point);
                LocateResolution::Located(point)
            }
            Err(err) => {
                warn!("[geolocation] Request {} failed: {}", request.seq, err);
                LocateResolution::Failed(err)
            }
        }
    }

    /// Last successfully located position.
    pub fn position(&self) -> Option<GeoPoint> {
        self.position
    }

    /// Whether a request is still awaiting its answer.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn config(&self) -> &GeolocationConfig {
        &self.config
    }
}

/// Await a position future, failing with [`GeolocationError::Timeout`] if it
/// does not finish within `timeout`.
#[cfg(feature = "async")]
pub async fn request_position<F>(
    lookup: F,
    timeout: Duration,
) -> std::result::Result<GeoPoint, GeolocationError>
where
    F: std::future::Future<Output = std::result::Result<GeoPoint, GeolocationError>>,
{
    match tokio::time::timeout(timeout, lookup).await {
        Ok(result) => result,
        Err(_) => Err(GeolocationError::Timeout),
    }
}
