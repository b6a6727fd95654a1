use std::fmt::{Display, Formatter, Result};

use crate::contour::Contour;
use crate::coordinate::{Coordinate, Layout};
use crate::geometry::Geom;
use crate::polygon::Polygon;

/// Displays a shape as well-known text.
///
/// Ordinates are written in `layout`, so a 2D layout drops elevation and measure. With `tagged` set, every
/// keyword is followed by the `Z`, `M` or `ZM` marker of the layout.
pub struct Wkt<'a> {
    geom: &'a Geom,
    layout: Layout,
    tagged: bool,
}

impl<'a> Wkt<'a> {
    /// Longitude and latitude only.
    pub fn xy(geom: &'a Geom) -> Self {
        Self {
            geom,
            layout: Layout::XY,
            tagged: false,
        }
    }

    /// All ordinates present in the shape.
    pub fn full(geom: &'a Geom) -> Self {
        Self {
            geom,
            layout: geom.layout(),
            tagged: true,
        }
    }
}

impl Display for Wkt<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_geom(f, self.geom, self.layout, self.tagged)
    }
}

fn has_no_parts(geom: &Geom) -> bool {
    match geom {
        Geom::Point(v) => v.is_empty(),
        Geom::LineString(v) => v.is_empty(),
        Geom::Polygon(v) => v.is_empty(),
        Geom::MultiPoint(v) => v.parts().is_empty(),
        Geom::MultiLineString(v) => v.parts().is_empty(),
        Geom::MultiPolygon(v) => v.parts().is_empty(),
        Geom::GeometryCollection(members) => members.is_empty(),
    }
}

fn write_geom(f: &mut Formatter<'_>, geom: &Geom, layout: Layout, tagged: bool) -> Result {
    f.write_str(geom.kind().wkt_keyword())?;
    if tagged {
        f.write_str(match (layout.has_z, layout.has_m) {
            (true, true) => " ZM",
            (true, false) => " Z",
            (false, true) => " M",
            (false, false) => "",
        })?;
    }

    if has_no_parts(geom) {
        return f.write_str(" EMPTY");
    }

    f.write_str(" ")?;
    match geom {
        Geom::Point(point) => match point.coordinate() {
            Some(coordinate) => write_point(f, coordinate, layout),
            None => f.write_str("EMPTY"),
        },
        Geom::LineString(line) => write_positions(f, line.positions(), layout),
        Geom::Polygon(polygon) => write_polygon(f, polygon, layout),
        Geom::MultiPoint(points) => write_list(f, points.parts(), |f, point| {
            match point.coordinate() {
                Some(coordinate) => write_point(f, coordinate, layout),
                None => f.write_str("EMPTY"),
            }
        }),
        Geom::MultiLineString(lines) => write_list(f, lines.parts(), |f, line| {
            if line.is_empty() {
                f.write_str("EMPTY")
            } else {
                write_positions(f, line.positions(), layout)
            }
        }),
        Geom::MultiPolygon(polygons) => write_list(f, polygons.parts(), |f, polygon| {
            if polygon.is_empty() {
                f.write_str("EMPTY")
            } else {
                write_polygon(f, polygon, layout)
            }
        }),
        Geom::GeometryCollection(members) => write_list(f, members, |f, member| {
            write_geom(f, member, layout, tagged)
        }),
    }
}

fn write_list<T>(
    f: &mut Formatter<'_>,
    items: &[T],
    mut write_item: impl FnMut(&mut Formatter<'_>, &T) -> Result,
) -> Result {
    f.write_str("(")?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_str(")")
}

fn write_point(f: &mut Formatter<'_>, coordinate: &Coordinate, layout: Layout) -> Result {
    f.write_str("(")?;
    write_coordinate(f, coordinate, layout)?;
    f.write_str(")")
}

fn write_coordinate(f: &mut Formatter<'_>, coordinate: &Coordinate, layout: Layout) -> Result {
    for (index, value) in coordinate.ordinates(layout).enumerate() {
        if index > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{value}")?;
    }

    Ok(())
}

fn write_positions(f: &mut Formatter<'_>, positions: &[Coordinate], layout: Layout) -> Result {
    write_list(f, positions, |f, c| write_coordinate(f, c, layout))
}

fn write_polygon(f: &mut Formatter<'_>, polygon: &Polygon, layout: Layout) -> Result {
    write_list(f, polygon.rings(), |f, ring| {
        write_positions(f, ring.positions(), layout)
    })
}
