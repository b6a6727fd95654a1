use geo::Intersects;
use geo_types::Coord;

use crate::segment::Segment;

use super::convert::Parts;

/// Shortest planar distance between the parts, `None` if either of them is empty.
pub(crate) fn distance(a: &Parts, b: &Parts) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }

    if a.to_geo().intersects(&b.to_geo()) {
        return Some(0.0);
    }

    let segments_a = segments(a);
    let segments_b = segments(b);

    let mut min_sq = f64::INFINITY;
    for p in &a.points {
        for q in &b.points {
            let dx = p.x - q.x;
            let dy = p.y - q.y;
            min_sq = min_sq.min(dx * dx + dy * dy);
        }

        for (start, end) in &segments_b {
            min_sq = min_sq.min(Segment(start, end).distance_to_point_sq(p));
        }
    }

    for q in &b.points {
        for (start, end) in &segments_a {
            min_sq = min_sq.min(Segment(start, end).distance_to_point_sq(q));
        }
    }

    // The shapes don't intersect, so no pair of segments does either.
    for (a_start, a_end) in &segments_a {
        for (b_start, b_end) in &segments_b {
            let sq = Segment(a_start, a_end).distance_to_disjoint_segment_sq(&Segment(b_start, b_end));
            min_sq = min_sq.min(sq);
        }
    }

    Some(min_sq.sqrt())
}

/// Segments of the curves and polygon boundaries.
fn segments(parts: &Parts) -> Vec<(Coord, Coord)> {
    let rings = parts
        .polygons
        .iter()
        .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()));

    parts
        .lines
        .iter()
        .chain(rings)
        .flat_map(|line| line.lines())
        .map(|line| (line.start, line.end))
        .collect()
}
