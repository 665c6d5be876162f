use std::num::NonZeroUsize;

use itertools::Itertools;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, debug_span, trace};

use crate::error::JoinError;
use crate::geometry::LatLon;
use crate::locator::{label, Location, RegionLocator};
use crate::partition::{default_workers, partition, split_mut};
use crate::registry::Registry;

/// Label given to points that no region contains.
pub const DEFAULT_UNASSIGNED: &str = "Fuera de Perú";

/// Settings of an [`AssignmentEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    workers: NonZeroUsize,
    unassigned: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            unassigned: DEFAULT_UNASSIGNED.to_owned(),
        }
    }
}

impl EngineConfig {
    /// Sets the number of worker threads. `0` is treated as `1`.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN);
        self
    }

    /// Sets the label of unassigned points.
    pub fn with_unassigned(mut self, unassigned: impl Into<String>) -> Self {
        self.unassigned = unassigned.into();
        self
    }

    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    pub fn unassigned(&self) -> &str {
        &self.unassigned
    }
}

/// The outcome of one assignment run.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    locations: Vec<Location>,
    labels: Vec<String>,
    region_counts: Vec<(String, usize)>,
    outside: usize,
    invalid: usize,
}

impl Assignment {
    /// One label per input point, in input order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }

    /// One location per input point, in input order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Number of points assigned to each region, in registration order.
    ///
    /// Every region is listed, including the ones that received no point.
    pub fn region_counts(&self) -> &[(String, usize)] {
        &self.region_counts
    }

    /// Number of valid points that no region contains.
    pub fn outside_count(&self) -> usize {
        self.outside
    }

    /// Number of points with a non-finite coordinate.
    pub fn invalid_count(&self) -> usize {
        self.invalid
    }
}

/// Assigns batches of points to regions, in parallel.
///
/// The engine owns its [`Registry`] and a pool of worker threads, so any
/// number of batches can be assigned without parsing the boundaries again.
pub struct AssignmentEngine {
    registry: Registry,
    config: EngineConfig,
    pool: ThreadPool,
}

impl AssignmentEngine {
    /// Creates an engine over an already built registry.
    ///
    /// Fails if the worker threads cannot be spawned.
    pub fn new(registry: Registry, config: EngineConfig) -> Result<Self, JoinError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers.get())
            .thread_name(|idx| format!("sjoin-worker-{idx}"))
            .build()?;
        Ok(Self {
            registry,
            config,
            pool,
        })
    }

    /// Builds the registry from WKT boundaries, then the engine.
    pub fn from_wkt<N, B>(
        names: &[N],
        boundaries: &[B],
        config: EngineConfig,
    ) -> Result<Self, JoinError>
    where
        N: AsRef<str>,
        B: AsRef<str>,
    {
        Self::new(Registry::build(names, boundaries)?, config)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn workers(&self) -> NonZeroUsize {
        self.config.workers
    }

    /// Locates every point.
    ///
    /// The points are split into one contiguous range per worker. Each worker
    /// writes the locations of its own range straight into the output, and
    /// the call returns once every worker is done.
    pub fn locate(&self, points: &[LatLon]) -> Vec<Location> {
        let mut locations = vec![Location::Outside; points.len()];
        if points.is_empty() {
            return locations;
        }

        let ranges = partition(points.len(), self.config.workers);
        let span = debug_span!("locate", points = points.len(), chunks = ranges.len());
        let _guard = span.enter();

        let chunks = ranges
            .iter()
            .cloned()
            .zip(split_mut(&mut locations, &ranges))
            .collect_vec();
        let registry = &self.registry;
        self.pool.scope(|scope| {
            for (range, slots) in chunks {
                scope.spawn(move |_| {
                    trace!(start = range.start, end = range.end, "locating chunk");
                    for (slot, point) in slots.iter_mut().zip(&points[range]) {
                        *slot = registry.locate_one(point);
                    }
                });
            }
        });

        debug!("located all points");
        locations
    }

    /// Assigns every point to a region name, or to the unassigned label.
    ///
    /// The result always has one entry per point, in the same order.
    pub fn assign(&self, points: &[LatLon]) -> Vec<String> {
        let locations = self.locate(points);
        self.render(&locations)
    }

    /// Like [`AssignmentEngine::assign`], but also keeps the raw locations and per-region counts.
    pub fn run(&self, points: &[LatLon]) -> Assignment {
        let locations = self.locate(points);
        let labels = self.render(&locations);

        let mut counts = vec![0; self.registry.len()];
        let (mut outside, mut invalid) = (0, 0);
        for location in &locations {
            match *location {
                Location::Region(index) => counts[index] += 1,
                Location::Outside => outside += 1,
                Location::InvalidPoint => invalid += 1,
            }
        }
        let region_counts = self
            .registry
            .names()
            .map(str::to_owned)
            .zip(counts)
            .collect_vec();
        debug!(outside, invalid, "assignment finished");

        Assignment {
            locations,
            labels,
            region_counts,
            outside,
            invalid,
        }
    }

    fn render(&self, locations: &[Location]) -> Vec<String> {
        let unassigned = self.config.unassigned.as_str();
        self.pool.install(|| {
            locations
                .par_iter()
                .map(|&location| label(location, &self.registry, unassigned).to_owned())
                .collect()
        })
    }
}

/// Assigns each point to the first region whose boundary contains it.
///
/// `names[j]` is the name of the region bounded by the WKT polygon
/// `boundaries[j]`. The registry is built for this call only and dropped
/// before returning. Uses [`EngineConfig::default`].
pub fn assign<N, B>(
    points: &[LatLon],
    names: &[N],
    boundaries: &[B],
) -> Result<Vec<String>, JoinError>
where
    N: AsRef<str>,
    B: AsRef<str>,
{
    assign_with(points, names, boundaries, EngineConfig::default())
}

/// Same as [`assign`], with an explicit configuration.
pub fn assign_with<N, B>(
    points: &[LatLon],
    names: &[N],
    boundaries: &[B],
    config: EngineConfig,
) -> Result<Vec<String>, JoinError>
where
    N: AsRef<str>,
    B: AsRef<str>,
{
    let engine = AssignmentEngine::from_wkt(names, boundaries, config)?;
    Ok(engine.assign(points))
}
