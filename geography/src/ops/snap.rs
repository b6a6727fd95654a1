//! Snapping of boolean operation output back to exact positions.
//!
//! `geo` boolean operations run on a fixed-point grid, so the positions they return can be off by a fraction of the
//! grid cell from the positions they were computed from. [`Snap`] replaces every output position with the closest
//! vertex of the input linework, or exact crossing of two input segments, lying within the grid tolerance.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo_types::{Coord, Line, LineString, MultiPolygon, Polygon};

/// Tolerance relative to the extent of the input. The grid cell is about `extent / 2^31`.
const RELATIVE_TOLERANCE: f64 = 1e-8;

/// Set of exact positions output positions are snapped to.
#[derive(Debug, Clone)]
pub(crate) struct Snap {
    /// Ordered by `x`, then by `y`.
    candidates: Vec<Coord>,
    tolerance: f64,
}

impl Snap {
    /// Collects the vertices of the linework and the points where its segments cross.
    pub fn new<'a>(linework: impl IntoIterator<Item = &'a LineString>) -> Self {
        let linework: Vec<&LineString> = linework.into_iter().collect();
        let segments: Vec<Line> = linework
            .iter()
            .flat_map(|line| line.lines())
            .filter(|segment| segment.start != segment.end)
            .collect();

        let mut candidates: Vec<Coord> = linework
            .iter()
            .flat_map(|line| line.coords().copied())
            .collect();
        for (index, segment) in segments.iter().enumerate() {
            for other in &segments[index + 1..] {
                if let Some(LineIntersection::SinglePoint {
                    intersection,
                    is_proper: true,
                }) = line_intersection(*segment, *other)
                {
                    candidates.push(intersection);
                }
            }
        }

        candidates.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        candidates.dedup();

        Self {
            tolerance: tolerance(&candidates),
            candidates,
        }
    }

    /// Closest candidate within the tolerance, or the position itself if there is none.
    pub fn coord(&self, position: Coord) -> Coord {
        let from = self
            .candidates
            .partition_point(|c| c.x < position.x - self.tolerance);

        self.candidates[from..]
            .iter()
            .take_while(|c| c.x <= position.x + self.tolerance)
            .map(|c| (*c, (c.x - position.x).hypot(c.y - position.y)))
            .filter(|(_, distance)| *distance <= self.tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(position, |(candidate, _)| candidate)
    }

    /// Snapped line. `None` if the line collapses to a single position.
    pub fn line(&self, line: &LineString) -> Option<LineString> {
        let mut coords: Vec<Coord> = line.coords().map(|c| self.coord(*c)).collect();
        coords.dedup();

        (coords.len() >= 2).then(|| LineString::new(coords))
    }

    /// Snapped polygons. Rings that collapse are dropped, and so are polygons whose exterior ring collapses.
    pub fn polygons(&self, polygons: MultiPolygon) -> MultiPolygon {
        polygons
            .into_iter()
            .filter_map(|polygon| self.polygon(&polygon))
            .collect()
    }

    fn polygon(&self, polygon: &Polygon) -> Option<Polygon> {
        let exterior = self.ring(polygon.exterior())?;
        let interiors = polygon
            .interiors()
            .iter()
            .filter_map(|ring| self.ring(ring))
            .collect();

        Some(Polygon::new(exterior, interiors))
    }

    fn ring(&self, ring: &LineString) -> Option<LineString> {
        let ring = self.line(ring)?;
        (ring.0.len() >= 4 && ring.is_closed() && twice_area(&ring) != 0.0).then_some(ring)
    }
}

fn tolerance(positions: &[Coord]) -> f64 {
    let Some(first) = positions.first() else {
        return 0.0;
    };

    let (mut min, mut max) = (*first, *first);
    for c in positions {
        min.x = min.x.min(c.x);
        min.y = min.y.min(c.y);
        max.x = max.x.max(c.x);
        max.y = max.y.max(c.y);
    }

    let extent = (max.x - min.x).max(max.y - min.y);
    let magnitude = [min.x, min.y, max.x, max.y]
        .into_iter()
        .fold(0.0, |acc: f64, v| acc.max(v.abs()));

    (extent * RELATIVE_TOLERANCE).max(magnitude * 4.0 * f64::EPSILON)
}

fn twice_area(ring: &LineString) -> f64 {
    let Some(origin) = ring.0.first() else {
        return 0.0;
    };

    ring.lines()
        .map(|segment| {
            let (a, b) = (segment.start - *origin, segment.end - *origin);
            a.x * b.y - b.x * a.y
        })
        .sum()
}
