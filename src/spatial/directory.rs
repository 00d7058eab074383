use log::debug;

use crate::spatial::kd_tree::AirportTree;
use crate::{Airport, GeoPoint};

/// Spatial airport query, the contract the nearest-airport tracker relies on.
pub trait AirportDirectory {
    /// Up to `limit` airports within `radius_m` of `point`, closest first.
    /// An empty result is not an error.
    fn find_airports_near(&self, point: GeoPoint, radius_m: f64, limit: usize) -> Vec<Airport>;
}

/// Airport directory held in memory and indexed by an [`AirportTree`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    airports: Vec<Airport>,
    tree: AirportTree,
}

impl InMemoryDirectory {
    pub fn new(airports: Vec<Airport>) -> Self {
        let tree = AirportTree::build(&airports);
        InMemoryDirectory { airports, tree }
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn index_of_icao(&self, icao: &str) -> Option<usize> {
        self.airports.iter().position(|a| a.icao == icao)
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }
}

impl AirportDirectory for InMemoryDirectory {
    fn find_airports_near(&self, point: GeoPoint, radius_m: f64, limit: usize) -> Vec<Airport> {
        let hits = self.tree.within_km(point, radius_m / 1000.0, limit);
        debug!(
            "{} of {} airports within {radius_m} m of {point:?}",
            hits.len(),
            self.airports.len()
        );
        hits.into_iter()
            .map(|hit| self.airports[hit.airport_idx].clone())
            .collect()
    }
}
