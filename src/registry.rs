use geo::Point;
use itertools::Itertools;
use tracing::{debug, warn};

use crate::error::{BoundaryError, JoinError};
use crate::geometry::PreparedBoundary;

/// A named region, prepared for containment queries.
///
/// A region whose boundary was rejected keeps its slot so that the indices of
/// the other regions still line up with the caller's input.
#[derive(Debug)]
pub struct PreparedRegion {
    name: String,
    boundary: Result<PreparedBoundary, BoundaryError>,
}

impl PreparedRegion {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The prepared boundary, or [`None`] if it was rejected.
    pub fn boundary(&self) -> Option<&PreparedBoundary> {
        self.boundary.as_ref().ok()
    }

    /// Why the boundary was rejected, if it was.
    pub fn issue(&self) -> Option<&BoundaryError> {
        self.boundary.as_ref().err()
    }

    /// Returns `true` if the region contains the point. Rejected regions contain nothing.
    pub fn contains(&self, point: &Point<f64>) -> bool {
        self.boundary()
            .is_some_and(|boundary| boundary.contains(point))
    }
}

/// The ordered set of regions used by a join.
///
/// Regions keep the order in which they were supplied: when boundaries
/// overlap, the first one listed wins. The registry is never mutated after
/// [`Registry::build`], so it can be shared by any number of threads.
#[derive(Debug, Default)]
pub struct Registry {
    regions: Vec<PreparedRegion>,
}

impl Registry {
    /// Parses and prepares every boundary, pairing `names[j]` with `boundaries[j]`.
    ///
    /// Fails only if the two slices have different lengths. A boundary that
    /// cannot be parsed or prepared is logged and kept as a region that never matches.
    pub fn build<N, B>(names: &[N], boundaries: &[B]) -> Result<Self, JoinError>
    where
        N: AsRef<str>,
        B: AsRef<str>,
    {
        if names.len() != boundaries.len() {
            return Err(JoinError::ContractViolation {
                names: names.len(),
                boundaries: boundaries.len(),
            });
        }

        let regions = names
            .iter()
            .zip(boundaries)
            .enumerate()
            .map(|(index, (name, text))| {
                let name = name.as_ref();
                let boundary = PreparedBoundary::from_wkt(text.as_ref());
                if let Err(err) = &boundary {
                    warn!(index, region = name, error = %err, "rejected region boundary");
                }
                PreparedRegion {
                    name: name.to_owned(),
                    boundary,
                }
            })
            .collect_vec();

        let registry = Self { regions };
        debug!(
            regions = registry.len(),
            usable = registry.usable_count(),
            "built region registry"
        );
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of regions whose boundary was accepted.
    pub fn usable_count(&self) -> usize {
        self.regions
            .iter()
            .filter(|region| region.boundary().is_some())
            .count()
    }

    pub fn regions(&self) -> &[PreparedRegion] {
        &self.regions
    }

    pub fn region(&self, index: usize) -> Option<&PreparedRegion> {
        self.regions.get(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.regions.iter().map(PreparedRegion::name)
    }

    /// Lists every rejected boundary as `(index, name, reason)`.
    pub fn issues(&self) -> impl Iterator<Item = (usize, &str, &BoundaryError)> + '_ {
        self.regions
            .iter()
            .enumerate()
            .filter_map(|(index, region)| Some((index, region.name(), region.issue()?)))
    }
}
