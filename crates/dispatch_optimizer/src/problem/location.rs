use geo::{Bearing, Distance, Haversine};
use crate::define_index_newtype;

define_index_newtype!(LocationIdx, Location);

impl LocationIdx {
    /// Index 0 of every travel matrix is the depot.
    pub const DEPOT: LocationIdx = LocationIdx::new(0);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    point: geo::Point,
}

impl Location {
    pub fn from_lat_lng(lat: f64, lng: f64) -> Self {
        Self {
            point: geo::Point::new(lng, lat),
        }
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lng(&self) -> f64 {
        self.point.x()
    }

    pub fn is_valid(&self) -> bool {
        let (lat, lng) = (self.lat(), self.lng());
        lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng)
    }

    /// Great-circle distance in kilometers.
    pub fn haversine_km(&self, to: &Location) -> f64 {
        if self == to {
            return 0.0;
        }

        Haversine.distance(self.point, to.point) / 1000.0
    }

    /// Compass bearing in degrees, 0 = north, clockwise, always within [0, 360).
    pub fn bearing(&self, dest: &Location) -> f64 {
        if self == dest {
            return 0.0;
        }

        let bearing = Haversine.bearing(self.point, dest.point).rem_euclid(360.0);
        if bearing >= 360.0 { 0.0 } else { bearing }
    }

    /// `[lat, lng]`, the order used by every polyline in the response.
    pub fn to_lat_lng(&self) -> [f64; 2] {
        [self.lat(), self.lng()]
    }
}

impl From<&Location> for geo::Point<f64> {
    fn from(location: &Location) -> Self {
        location.point
    }
}
