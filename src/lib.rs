//! Parallel point-in-polygon region assignment.
//!
//! Given a batch of `(latitude, longitude)` points and a list of named WKT
//! boundaries, every point is assigned the name of the first boundary that
//! contains it, or an "unassigned" label if none does.
//!
//! ```
//! use sjoin::{assign, LatLon, DEFAULT_UNASSIGNED};
//!
//! let names = ["Lima", "Arequipa"];
//! let boundaries = [
//!     "POLYGON((-77.5 -11.5, -76.5 -11.5, -76.5 -12.5, -77.5 -12.5, -77.5 -11.5))",
//!     "POLYGON((-72 -16, -71 -16, -71 -17, -72 -17, -72 -16))",
//! ];
//! let points = [
//!     LatLon::new(-12.05, -77.04),
//!     LatLon::new(-16.41, -71.54),
//!     LatLon::new(4.71, -74.07),
//! ];
//!
//! let labels = assign(&points, &names, &boundaries).unwrap();
//!
//! assert_eq!(labels, ["Lima", "Arequipa", DEFAULT_UNASSIGNED]);
//! ```
//!
//! To assign several batches against the same boundaries, build an
//! [`AssignmentEngine`] once and call [`AssignmentEngine::assign`] as often as needed.

mod engine;
mod error;
mod geometry;
mod locator;
mod partition;
mod registry;

pub use crate::engine::{
    assign, assign_with, Assignment, AssignmentEngine, EngineConfig, DEFAULT_UNASSIGNED,
};
pub use crate::error::{BoundaryError, JoinError};
pub use crate::geometry::{make_point, parse_boundary, LatLon, PreparedBoundary};
pub use crate::locator::{evaluate, label, Location, RegionLocator};
pub use crate::partition::{default_workers, partition};
pub use crate::registry::{PreparedRegion, Registry};
