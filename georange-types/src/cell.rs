use geo::{Point, Rect, coord};
use serde::{Deserialize, Serialize};

/// The latitude/longitude rectangle covered by one geohash cell.
///
/// # Examples
///
/// ```
/// use georange_types::cell::CellBounds;
///
/// let bounds = CellBounds::new(0.0, 45.0, 0.0, 90.0);
/// let center = bounds.center();
/// assert_eq!(center.x(), 45.0);
/// assert_eq!(center.y(), 22.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl CellBounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Centre of the cell as a `geo::Point` (x = longitude, y = latitude).
    pub fn center(&self) -> Point<f64> {
        Point::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Cell height in degrees of latitude.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Cell width in degrees of longitude.
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Returns true if the point lies inside the cell. The northern and eastern
    /// edges belong to the neighbouring cells.
    pub fn contains(&self, point: &Point<f64>) -> bool {
        (self.min_lat..self.max_lat).contains(&point.y())
            && (self.min_lon..self.max_lon).contains(&point.x())
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }
}

/// The eight cells surrounding a geohash cell at the same precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellNeighbors<T> {
    pub n: T,
    pub ne: T,
    pub e: T,
    pub se: T,
    pub s: T,
    pub sw: T,
    pub w: T,
    pub nw: T,
}

impl<T: Copy> CellNeighbors<T> {
    /// Neighbours in clockwise order starting from north.
    pub fn to_array(&self) -> [T; 8] {
        [
            self.n, self.ne, self.e, self.se, self.s, self.sw, self.w, self.nw,
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = T> {
        self.to_array().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_bounds_spans() {
        let bounds = CellBounds::new(-90.0, 0.0, -180.0, 0.0);
        assert_eq!(bounds.lat_span(), 90.0);
        assert_eq!(bounds.lon_span(), 180.0);
        assert_eq!(bounds.center(), Point::new(-90.0, -45.0));
    }

    #[test]
    fn test_cell_bounds_contains_excludes_upper_edges() {
        let bounds = CellBounds::new(0.0, 10.0, 0.0, 10.0);
        assert!(bounds.contains(&Point::new(0.0, 0.0)));
        assert!(bounds.contains(&Point::new(9.99, 9.99)));
        assert!(!bounds.contains(&Point::new(10.0, 5.0)));
        assert!(!bounds.contains(&Point::new(5.0, 10.0)));
    }

    #[test]
    fn test_cell_bounds_to_rect() {
        let rect = CellBounds::new(1.0, 2.0, 3.0, 4.0).to_rect();
        assert_eq!(rect.min().x, 3.0);
        assert_eq!(rect.min().y, 1.0);
        assert_eq!(rect.max().x, 4.0);
        assert_eq!(rect.max().y, 2.0);
    }

    #[test]
    fn test_neighbors_order() {
        let neighbors = CellNeighbors {
            n: 1,
            ne: 2,
            e: 3,
            se: 4,
            s: 5,
            sw: 6,
            w: 7,
            nw: 8,
        };
        assert_eq!(neighbors.to_array(), [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(neighbors.iter().sum::<i32>(), 36);
    }
}
