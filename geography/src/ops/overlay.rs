//! Set operations on [`Parts`].
//!
//! Surfaces are combined with `geo` boolean operations. Curves are clipped by surfaces and compared with each
//! other segment by segment: collinear overlaps are found with exact predicates and removed by subtracting
//! parameter intervals along each segment.
//!
//! Everything that comes out of a `geo` boolean operation is snapped back to the input positions, see
//! [`Snap`].

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{BooleanOps, Intersects};
use geo_types::{Coord, Line, LineString, MultiLineString, MultiPolygon, Point};

use super::convert::{covered_by, unique_points, Parts};
use super::snap::Snap;

/// Boolean set operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Operation {
    Intersection,
    Union,
    Difference,
    SymmetricDifference,
}

/// Computes `a <operation> b`.
pub(crate) fn overlay(a: &Parts, b: &Parts, operation: Operation) -> Parts {
    log::trace!(
        "{operation:?} of {}/{}/{} and {}/{}/{} points/lines/polygons",
        a.points.len(),
        a.lines.len(),
        a.polygons.0.len(),
        b.points.len(),
        b.lines.len(),
        b.polygons.0.len()
    );

    match operation {
        Operation::Intersection => intersection(a, b),
        Operation::Union => union(a, b),
        Operation::Difference => difference(a, b),
        Operation::SymmetricDifference => {
            let a_minus_b = difference(a, b);
            let b_minus_a = difference(b, a);
            Parts {
                points: unique_points(a_minus_b.points.into_iter().chain(b_minus_a.points)),
                lines: a_minus_b.lines.into_iter().chain(b_minus_a.lines).collect(),
                polygons: surfaces(&a.polygons, &b.polygons, operation),
            }
        }
    }
}

/// Boolean operation on surfaces. Operands that have no common point are combined without `BooleanOps`.
pub(crate) fn surfaces(a: &MultiPolygon, b: &MultiPolygon, operation: Operation) -> MultiPolygon {
    if a.0.is_empty() || b.0.is_empty() || !a.intersects(b) {
        return match operation {
            Operation::Intersection => MultiPolygon::new(vec![]),
            Operation::Difference => a.clone(),
            Operation::Union | Operation::SymmetricDifference => {
                a.iter().chain(b).cloned().collect()
            }
        };
    }

    let result = match operation {
        Operation::Intersection => a.intersection(b),
        Operation::Union => a.union(b),
        Operation::Difference => a.difference(b),
        Operation::SymmetricDifference => a.xor(b),
    };

    Snap::new(boundaries(a).chain(boundaries(b))).polygons(result)
}

fn intersection(a: &Parts, b: &Parts) -> Parts {
    let polygons = surfaces(&a.polygons, &b.polygons, Operation::Intersection);
    let rings_a = rings(&a.polygons);
    let rings_b = rings(&b.polygons);

    let mut lines = inside(&a.lines, &b.polygons);
    lines.extend(inside(&b.lines, &a.polygons));
    lines.extend(overlaps(&a.lines, &b.lines));
    lines.extend(overlaps(&a.lines, &rings_b));
    lines.extend(overlaps(&rings_a, &b.lines));
    lines.extend(overlaps(&rings_a, &rings_b));
    let lines = exterior_lines(&merge_lines(lines), &polygons);

    let linework_a: Vec<LineString> = a.lines.iter().chain(&rings_a).cloned().collect();
    let linework_b: Vec<LineString> = b.lines.iter().chain(&rings_b).cloned().collect();

    let candidates = a
        .points
        .iter()
        .copied()
        .filter(|p| b.covers(*p))
        .chain(b.points.iter().copied().filter(|p| a.covers(*p)))
        .chain(crossings(&linework_a, &linework_b));
    let points = unique_points(candidates.filter(|p| !covered_by(*p, &lines, &polygons)));

    Parts {
        points,
        lines,
        polygons,
    }
}

fn union(a: &Parts, b: &Parts) -> Parts {
    let polygons = surfaces(&a.polygons, &b.polygons, Operation::Union);
    let lines = exterior_lines(
        &merge_lines(a.lines.iter().chain(&b.lines).cloned().collect()),
        &polygons,
    );
    let points = unique_points(
        a.points
            .iter()
            .chain(&b.points)
            .copied()
            .filter(|p| !covered_by(*p, &lines, &polygons)),
    );

    Parts {
        points,
        lines,
        polygons,
    }
}

fn difference(a: &Parts, b: &Parts) -> Parts {
    let polygons = surfaces(&a.polygons, &b.polygons, Operation::Difference);
    let lines = subtract(&exterior_lines(&a.lines, &b.polygons), &b.lines);
    let points = a.points.iter().copied().filter(|p| !b.covers(*p)).collect();

    Parts {
        points,
        lines,
        polygons,
    }
}

/// Rings of the polygons.
pub(crate) fn boundaries(polygons: &MultiPolygon) -> impl Iterator<Item = &LineString> {
    polygons
        .iter()
        .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
}

fn rings(polygons: &MultiPolygon) -> Vec<LineString> {
    boundaries(polygons).cloned().collect()
}

fn segments(lines: &[LineString]) -> impl Iterator<Item = Line> + '_ {
    lines
        .iter()
        .flat_map(|line| line.lines())
        .filter(|segment| segment.start != segment.end)
}

/// Parts of the lines inside the polygons.
fn inside(lines: &[LineString], polygons: &MultiPolygon) -> Vec<LineString> {
    if lines.is_empty() || polygons.0.is_empty() {
        return vec![];
    }

    let snap = Snap::new(lines.iter().chain(boundaries(polygons)));
    polygons
        .clip(&MultiLineString::new(lines.to_vec()), false)
        .iter()
        .filter_map(|line| snap.line(line))
        .collect()
}

/// Parts of the lines that have no common points with the polygons except for single crossing points.
pub(crate) fn exterior_lines(lines: &[LineString], polygons: &MultiPolygon) -> Vec<LineString> {
    if lines.is_empty() || polygons.0.is_empty() {
        return lines.to_vec();
    }

    let snap = Snap::new(lines.iter().chain(boundaries(polygons)));
    let clipped = polygons.clip(&MultiLineString::new(lines.to_vec()), true);
    let edges: Vec<Line> = segments(&rings(polygons)).collect();

    // Clipping splits the lines at the polygon boundaries, so every remaining segment is either completely
    // outside or runs along a boundary.
    let mut result = vec![];
    for line in clipped.iter().filter_map(|line| snap.line(line)) {
        let mut current: Vec<Coord> = vec![];
        for segment in line.lines() {
            let midpoint = Point::from((segment.start + segment.end) / 2.0);
            if polygons.intersects(&midpoint) || runs_along(segment, &edges) {
                flush(&mut current, &mut result);
                continue;
            }

            push_segment(&mut current, &mut result, segment.start, segment.end);
        }
        flush(&mut current, &mut result);
    }

    result
}

/// Whether the segment lies on one of the edges.
fn runs_along(segment: Line, edges: &[Line]) -> bool {
    edges.iter().any(|edge| {
        matches!(
            line_intersection(segment, *edge),
            Some(LineIntersection::Collinear { intersection }) if intersection == segment
                || intersection == Line::new(segment.end, segment.start)
        )
    })
}

/// Collinear overlaps of the two sets of lines.
fn overlaps(lines: &[LineString], others: &[LineString]) -> Vec<LineString> {
    let others: Vec<Line> = segments(others).collect();
    let mut result = vec![];
    for segment in segments(lines) {
        for other in &others {
            if let Some(LineIntersection::Collinear { intersection }) =
                line_intersection(segment, *other)
            {
                if intersection.start != intersection.end {
                    result.push(LineString::new(vec![intersection.start, intersection.end]));
                }
            }
        }
    }

    result
}

/// Points where segments of the two sets of lines meet in a single point.
fn crossings(lines: &[LineString], others: &[LineString]) -> Vec<Coord> {
    let others: Vec<Line> = segments(others).collect();
    let mut result = vec![];
    for segment in segments(lines) {
        for other in &others {
            if let Some(LineIntersection::SinglePoint { intersection, .. }) =
                line_intersection(segment, *other)
            {
                result.push(intersection);
            }
        }
    }

    result
}

/// Joins the lines dropping the parts that repeat the previous ones.
pub(crate) fn merge_lines(lines: Vec<LineString>) -> Vec<LineString> {
    let mut merged: Vec<LineString> = vec![];
    for line in lines {
        let rest = subtract(std::slice::from_ref(&line), &merged);
        merged.extend(rest);
    }

    merged
}

/// Parts of the lines that are not covered by the cutters.
fn subtract(lines: &[LineString], cutters: &[LineString]) -> Vec<LineString> {
    if cutters.is_empty() {
        return lines.to_vec();
    }

    let cutters: Vec<Line> = segments(cutters).collect();
    let mut result = vec![];
    for line in lines {
        let mut current: Vec<Coord> = vec![];
        for segment in line.lines().filter(|s| s.start != s.end) {
            for (from, to) in uncovered_intervals(segment, &cutters) {
                push_segment(&mut current, &mut result, at(segment, from), at(segment, to));
            }
        }
        flush(&mut current, &mut result);
    }

    result
}

fn push_segment(current: &mut Vec<Coord>, result: &mut Vec<LineString>, start: Coord, end: Coord) {
    if current.last() != Some(&start) {
        flush(current, result);
        current.push(start);
    }
    current.push(end);
}

fn flush(current: &mut Vec<Coord>, result: &mut Vec<LineString>) {
    if current.len() >= 2 {
        result.push(LineString::new(std::mem::take(current)));
    } else {
        current.clear();
    }
}

/// Position of the point along the segment: `0` at the start, `1` at the end.
fn parameter(segment: Line, point: Coord) -> f64 {
    let delta = segment.delta();
    let offset = point - segment.start;
    let t = (offset.x * delta.x + offset.y * delta.y) / (delta.x * delta.x + delta.y * delta.y);
    t.clamp(0.0, 1.0)
}

fn at(segment: Line, t: f64) -> Coord {
    if t <= 0.0 {
        segment.start
    } else if t >= 1.0 {
        segment.end
    } else {
        segment.start + segment.delta() * t
    }
}

/// Parameter intervals of the segment that no cutter runs along.
fn uncovered_intervals(segment: Line, cutters: &[Line]) -> Vec<(f64, f64)> {
    let mut covered: Vec<(f64, f64)> = cutters
        .iter()
        .filter_map(|cutter| match line_intersection(segment, *cutter) {
            Some(LineIntersection::Collinear { intersection }) => {
                let from = parameter(segment, intersection.start);
                let to = parameter(segment, intersection.end);
                Some((from.min(to), from.max(to)))
            }
            _ => None,
        })
        .collect();
    covered.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut result = vec![];
    let mut position = 0.0;
    for (from, to) in covered {
        if from > position {
            result.push((position, from));
        }
        position = f64::max(position, to);
    }

    if position < 1.0 {
        result.push((position, 1.0));
    }

    result
}
