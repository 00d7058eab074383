use core::cmp::Ordering;

use crate::geo::great_circle::{chord_for_km, unit_vector};
use crate::{Airport, GeoPoint};

/// One airport in the tree, stored with its position on the unit sphere.
#[derive(Debug, Clone)]
struct AirportNode {
    location: GeoPoint,
    xyz: [f64; 3],
    airport_idx: usize,
    split_axis: usize,
    below: Option<Box<AirportNode>>,
    above: Option<Box<AirportNode>>,
}

/// A hit from [`AirportTree::within_km`]: index into the airport slice the
/// tree was built from and its great-circle distance from the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirportHit {
    pub airport_idx: usize,
    pub distance_km: f64,
}

/// k-d tree over airport locations. Airports are split on their unit-sphere
/// coordinates so a query box never has to wrap at the antimeridian.
#[derive(Debug, Clone, Default)]
pub struct AirportTree {
    root: Option<Box<AirportNode>>,
}

impl AirportTree {
    pub fn build(airports: &[Airport]) -> Self {
        let mut nodes: Vec<(usize, GeoPoint, [f64; 3])> = airports
            .iter()
            .enumerate()
            .map(|(idx, airport)| {
                let location = airport.location();
                (idx, location, unit_vector(location))
            })
            .collect();
        AirportTree {
            root: Self::split(&mut nodes, 0),
        }
    }

    fn split(nodes: &mut [(usize, GeoPoint, [f64; 3])], depth: usize) -> Option<Box<AirportNode>> {
        if nodes.is_empty() {
            return None;
        }

        let split_axis = depth % 3;
        nodes.sort_by(|a, b| a.2[split_axis].total_cmp(&b.2[split_axis]));
        let mid = nodes.len() / 2;
        let (airport_idx, location, xyz) = nodes[mid];

        let (below, rest) = nodes.split_at_mut(mid);
        Some(Box::new(AirportNode {
            location,
            xyz,
            airport_idx,
            split_axis,
            below: Self::split(below, depth + 1),
            above: Self::split(&mut rest[1..], depth + 1),
        }))
    }

    /// Up to `limit` airports within `radius_km` of `point` along the
    /// surface, closest first. Equal distances keep input order.
    pub fn within_km(&self, point: GeoPoint, radius_km: f64, limit: usize) -> Vec<AirportHit> {
        let chord = chord_for_km(radius_km);
        let mut hits = Vec::new();
        Self::collect(&self.root, point, unit_vector(point), chord * chord, &mut hits);
        hits.sort_by(|a, b| match a.distance_km.total_cmp(&b.distance_km) {
            Ordering::Equal => a.airport_idx.cmp(&b.airport_idx),
            ord => ord,
        });
        hits.truncate(limit);
        hits
    }

    fn collect(
        node: &Option<Box<AirportNode>>,
        point: GeoPoint,
        target: [f64; 3],
        chord2: f64,
        hits: &mut Vec<AirportHit>,
    ) {
        let Some(node) = node else {
            return;
        };

        let dist2: f64 = (0..3).map(|i| (node.xyz[i] - target[i]).powi(2)).sum();
        if dist2 <= chord2 {
            hits.push(AirportHit {
                airport_idx: node.airport_idx,
                distance_km: point.distance_km(&node.location),
            });
        }

        let delta = target[node.split_axis] - node.xyz[node.split_axis];
        let (near, far) = if delta < 0.0 {
            (&node.below, &node.above)
        } else {
            (&node.above, &node.below)
        };
        Self::collect(near, point, target, chord2, hits);
        if delta * delta <= chord2 {
            Self::collect(far, point, target, chord2, hits);
        }
    }
}
