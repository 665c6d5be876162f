use rayon::prelude::*;

use crate::geometry::{make_point, LatLon};
use crate::registry::Registry;

/// Where a query point ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Inside the region at this index of the registry.
    Region(usize),
    /// A valid point that no region contains.
    Outside,
    /// The point has a non-finite coordinate and was not tested.
    InvalidPoint,
}

impl Location {
    /// The index of the containing region, if any.
    pub fn region(self) -> Option<usize> {
        match self {
            Self::Region(index) => Some(index),
            Self::Outside | Self::InvalidPoint => None,
        }
    }
}

/// A trait to locate one or several query points among a set of regions.
pub trait RegionLocator {
    /// Locates one query point.
    fn locate_one(&self, point: &LatLon) -> Location;

    /// Locates several query points.
    fn locate_many(&self, points: &[LatLon]) -> Vec<Location> {
        points.iter().map(|point| self.locate_one(point)).collect()
    }

    /// Locates several query points in parallel, on the global rayon pool.
    fn par_locate_many(&self, points: &[LatLon]) -> Vec<Location>
    where
        Self: std::marker::Sync,
    {
        points
            .par_iter()
            .map(|point| self.locate_one(point))
            .collect()
    }
}

impl RegionLocator for Registry {
    /// Locates a point by testing the regions in registration order.
    ///
    /// The first region that contains the point wins, whatever the size of
    /// the other regions that may also contain it.
    fn locate_one(&self, point: &LatLon) -> Location {
        let Some(point) = make_point(point) else {
            return Location::InvalidPoint;
        };
        self.regions()
            .iter()
            .position(|region| region.contains(&point))
            .map_or(Location::Outside, Location::Region)
    }
}

/// Returns the name of the region containing `point`, or `unassigned`.
pub fn evaluate<'a>(point: &LatLon, registry: &'a Registry, unassigned: &'a str) -> &'a str {
    label(registry.locate_one(point), registry, unassigned)
}

/// Renders a location as a region name, or `unassigned` if it has none.
pub fn label<'a>(location: Location, registry: &'a Registry, unassigned: &'a str) -> &'a str {
    location
        .region()
        .and_then(|index| registry.region(index))
        .map_or(unassigned, |region| region.name())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use proptest::prelude::*;

    use super::*;

    const OUTSIDE: &str = "Fuera de Perú";

    prop_compose! {
        fn coords_in_range(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64)
                          (lat in lat_min..lat_max, lon in lon_min..lon_max) -> LatLon {
           LatLon::new(lat, lon)
        }
    }

    fn square(lon_min: f64, lat_min: f64, lon_max: f64, lat_max: f64) -> String {
        format!(
            "POLYGON(({lon_min} {lat_min}, {lon_max} {lat_min}, {lon_max} {lat_max}, \
             {lon_min} {lat_max}, {lon_min} {lat_min}))"
        )
    }

    fn peru() -> Result<Registry> {
        Ok(Registry::build(
            &["Lima", "Arequipa"],
            &[
                square(-77.5, -12.5, -76.5, -11.5),
                square(-72., -17., -71., -16.),
            ],
        )?)
    }

    #[test]
    fn locate_points_in_two_regions() -> Result<()> {
        let registry = peru()?;
        let points = [
            LatLon::new(-12.05, -77.04),
            LatLon::new(-16.41, -71.54),
            LatLon::new(4.71, -74.07),
        ];

        let locations = registry.locate_many(&points);

        assert_eq!(
            locations,
            vec![Location::Region(0), Location::Region(1), Location::Outside]
        );

        Ok(())
    }

    #[test]
    fn coordinates_are_not_read_as_lon_lat() -> Result<()> {
        let registry = peru()?;

        // Lima's coordinates with the axes the wrong way round
        let location = registry.locate_one(&LatLon::new(-77.04, -12.05));

        assert_eq!(location, Location::Outside);

        Ok(())
    }

    #[test]
    fn first_listed_region_wins() -> Result<()> {
        //
        //     +--------------------+
        //     |  big               |
        //     |     +-------+      |
        //     |     | small |      |
        //     |     |   x   |      |
        //     |     +-------+      |
        //     +--------------------+
        //
        let big = square(0., 0., 10., 10.);
        let small = square(4., 4., 6., 6.);
        let point = LatLon::new(5., 5.);

        let big_first = Registry::build(&["big", "small"], &[&big, &small])?;
        let small_first = Registry::build(&["small", "big"], &[&small, &big])?;

        assert_eq!(evaluate(&point, &big_first, OUTSIDE), "big");
        assert_eq!(evaluate(&point, &small_first, OUTSIDE), "small");

        Ok(())
    }

    #[test]
    fn invalid_points_are_not_tested() -> Result<()> {
        let registry = peru()?;

        assert_eq!(
            registry.locate_one(&LatLon::new(f64::NAN, -77.04)),
            Location::InvalidPoint
        );
        assert_eq!(
            evaluate(&LatLon::new(-12.05, f64::INFINITY), &registry, OUTSIDE),
            OUTSIDE
        );

        Ok(())
    }

    #[test]
    fn rejected_boundary_is_skipped() -> Result<()> {
        let registry = Registry::build(
            &["Broken", "Lima"],
            &["POLYGON((-80 -20, -60 -20,".to_owned(), square(-77.5, -12.5, -76.5, -11.5)],
        )?;

        assert_eq!(
            registry.locate_one(&LatLon::new(-12.05, -77.04)),
            Location::Region(1)
        );
        assert_eq!(
            registry.locate_one(&LatLon::new(-15., -65.)),
            Location::Outside
        );

        Ok(())
    }

    #[test]
    fn no_regions_means_outside() {
        let registry = Registry::default();

        assert_eq!(
            registry.locate_one(&LatLon::new(0., 0.)),
            Location::Outside
        );
    }

    #[test]
    fn label_renders_locations() -> Result<()> {
        let registry = peru()?;

        assert_eq!(label(Location::Region(1), &registry, OUTSIDE), "Arequipa");
        assert_eq!(label(Location::Outside, &registry, OUTSIDE), OUTSIDE);
        assert_eq!(label(Location::InvalidPoint, &registry, OUTSIDE), OUTSIDE);

        Ok(())
    }

    #[test]
    fn parallel_and_sequential_location_agree() -> Result<()> {
        let registry = peru()?;

        let np = 200;
        proptest!(|(points in proptest::collection::vec(coords_in_range(-18., 0., -80., -68.), np))| {
            let sequential = registry.locate_many(&points);
            let parallel = registry.par_locate_many(&points);

            prop_assert_eq!(sequential, parallel);
        });

        Ok(())
    }
}
