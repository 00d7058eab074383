use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::nearest::rank::rank_nearest;
use crate::{Airport, GeoPoint};

/// Shown in the nearest badge until an airport qualifies.
pub const NO_NEAREST: &str = "—";
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);
pub const LOOKUP_RADIUS_M: f64 = 1_000_000.0;
pub const LOOKUP_LIMIT: usize = 300;

/// A directory query handed out by [`NearestTracker::poll`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookupRequest {
    pub id: u64,
    pub origin: GeoPoint,
    pub radius_m: f64,
    pub limit: usize,
}

/// Keeps the current nearest airport and makes sure at most one directory
/// lookup is outstanding. Request ids increase monotonically; results for any
/// id other than the outstanding one are dropped.
#[derive(Debug)]
pub struct NearestTracker {
    refresh_every: Duration,
    next_id: u64,
    in_flight: Option<LookupRequest>,
    last_issued: Option<Instant>,
    current: Option<String>,
}

impl Default for NearestTracker {
    fn default() -> Self {
        NearestTracker::new(REFRESH_INTERVAL)
    }
}

impl NearestTracker {
    pub fn new(refresh_every: Duration) -> Self {
        NearestTracker {
            refresh_every,
            next_id: 1,
            in_flight: None,
            last_issued: None,
            current: None,
        }
    }

    /// Issues a new lookup if none is outstanding and the last one is older
    /// than the refresh interval. The first poll always issues.
    pub fn poll(&mut self, now: Instant, origin: GeoPoint) -> Option<LookupRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let due = match self.last_issued {
            None => true,
            Some(issued) => now.saturating_duration_since(issued) >= self.refresh_every,
        };
        if !due {
            return None;
        }

        let request = LookupRequest {
            id: self.next_id,
            origin,
            radius_m: LOOKUP_RADIUS_M,
            limit: LOOKUP_LIMIT,
        };
        self.next_id += 1;
        self.in_flight = Some(request);
        self.last_issued = Some(now);
        debug!("nearest lookup {} issued at {:?}", request.id, origin);
        Some(request)
    }

    /// Applies a directory result. Returns false when `id` is not the
    /// outstanding request.
    pub fn complete(&mut self, id: u64, airports: &[Airport], min_runway_m: f64) -> bool {
        let Some(request) = self.in_flight else {
            warn!("nearest lookup {id} completed with nothing outstanding");
            return false;
        };
        if request.id != id {
            warn!("dropping stale nearest lookup {id}, waiting for {}", request.id);
            return false;
        }
        self.in_flight = None;
        self.current = rank_nearest(request.origin, airports, min_runway_m).map(|apt| apt.icao.clone());
        debug!(
            "nearest lookup {id}: {} candidates, nearest {}",
            airports.len(),
            self.display()
        );
        true
    }

    /// Abandons the outstanding request, if any. Its result will be dropped.
    pub fn cancel(&mut self) -> Option<LookupRequest> {
        self.in_flight.take()
    }

    pub fn in_flight(&self) -> Option<&LookupRequest> {
        self.in_flight.as_ref()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// ICAO code for the badge, or [`NO_NEAREST`].
    pub fn display(&self) -> &str {
        self.current().unwrap_or(NO_NEAREST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airports() -> Vec<Airport> {
        vec![
            Airport {
                icao: "EHAM".into(),
                lat: 52.3086,
                lon: 4.7639,
                runway_lengths_m: vec![3800.0],
            },
            Airport {
                icao: "EHLE".into(),
                lat: 52.4603,
                lon: 5.5272,
                runway_lengths_m: vec![2700.0],
            },
        ]
    }

    #[test]
    fn one_request_in_flight_at_a_time() {
        let mut tracker = NearestTracker::default();
        let t0 = Instant::now();
        let origin = GeoPoint::new(52.3, 4.8);

        let first = tracker.poll(t0, origin).expect("first poll issues");
        assert_eq!(first.limit, LOOKUP_LIMIT);
        assert!(tracker.poll(t0 + Duration::from_secs(60), origin).is_none());

        assert!(tracker.complete(first.id, &airports(), 0.0));
        assert_eq!(tracker.display(), "EHAM");
        assert!(tracker.in_flight().is_none());
    }

    #[test]
    fn refresh_waits_for_interval() {
        let mut tracker = NearestTracker::default();
        let t0 = Instant::now();
        let origin = GeoPoint::new(52.3, 4.8);
        let first = tracker.poll(t0, origin).unwrap();
        tracker.complete(first.id, &airports(), 0.0);

        assert!(tracker.poll(t0 + Duration::from_secs(29), origin).is_none());
        let second = tracker.poll(t0 + REFRESH_INTERVAL, origin).expect("due");
        assert!(second.id > first.id);
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut tracker = NearestTracker::new(Duration::ZERO);
        let t0 = Instant::now();
        let first = tracker.poll(t0, GeoPoint::new(52.3, 4.8)).unwrap();
        assert_eq!(tracker.cancel(), Some(first));

        let second = tracker.poll(t0, GeoPoint::new(52.46, 5.5)).unwrap();
        assert!(!tracker.complete(first.id, &airports(), 0.0));
        assert_eq!(tracker.display(), NO_NEAREST);

        assert!(tracker.complete(second.id, &airports(), 0.0));
        assert_eq!(tracker.display(), "EHLE");
        assert!(!tracker.complete(second.id, &airports(), 0.0));
    }

    #[test]
    fn fully_filtered_result_shows_sentinel() {
        let mut tracker = NearestTracker::new(Duration::ZERO);
        let t0 = Instant::now();
        let origin = GeoPoint::new(52.3, 4.8);
        let first = tracker.poll(t0, origin).unwrap();
        tracker.complete(first.id, &airports(), 0.0);
        assert_eq!(tracker.current(), Some("EHAM"));

        let second = tracker.poll(t0, origin).unwrap();
        tracker.complete(second.id, &airports(), 5000.0);
        assert_eq!(tracker.display(), NO_NEAREST);

        let third = tracker.poll(t0, origin).unwrap();
        tracker.complete(third.id, &[], 0.0);
        assert_eq!(tracker.current(), None);
    }
}
