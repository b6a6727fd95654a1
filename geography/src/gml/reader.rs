use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::config::{CodecOptions, ThirdOrdinate};
use crate::contour::{LineString, LinearRing};
use crate::coordinate::{Coordinate, Layout};
use crate::crs::CoordinateSystemId;
use crate::error::{GeographyError, ParseError, WireFormat};
use crate::geometry::Geom;
use crate::geometry_type::ShapeKind;
use crate::point::Point;
use crate::polygon::Polygon;

/// Elements below the deepest geometry collection: `MultiSurface/surfaceMember/Polygon/exterior/LinearRing/posList`.
const LEAF_ELEMENTS_DEPTH: usize = 6;

/// Parses geography markup into a shape.
///
/// Element names are matched without their namespace prefix. A `srsName` attribute, if present, must name the
/// `srid` coordinate system.
pub fn parse(
    markup: &str,
    srid: CoordinateSystemId,
    options: &CodecOptions,
) -> Result<Geom, GeographyError> {
    let max_elements_depth = 2 * options.max_depth() + LEAF_ELEMENTS_DEPTH;
    let root = read_tree(markup, max_elements_depth)?;
    let interpreter = Interpreter {
        srid,
        options: *options,
    };

    interpreter.geometry(&root, 1, None)
}

fn error(offset: usize, message: impl Into<String>) -> ParseError {
    ParseError::new(WireFormat::Markup, offset, message)
}

/// Markup element with the namespace prefixes stripped from its name and attribute names.
#[derive(Debug)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
    offset: usize,
}

impl Element {
    fn start(start: &BytesStart<'_>, offset: usize) -> Result<Self, ParseError> {
        let mut attributes = vec![];
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|err| error(offset, err.to_string()))?;
            attributes.push((
                String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned(),
                String::from_utf8_lossy(&attribute.value).into_owned(),
            ));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            attributes,
            children: vec![],
            text: String::new(),
            offset,
        })
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn unexpected_child(&self, child: &Element) -> ParseError {
        error(
            child.offset,
            format!("unexpected element `{}` in `{}`", child.name, self.name),
        )
    }
}

/// Reads the whole document into an element tree without recursion.
fn read_tree(markup: &str, max_depth: usize) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = vec![];
    let mut root = None;

    let mut attach = |stack: &mut Vec<Element>, element: Element| -> Result<(), ParseError> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => root = Some(element),
            None => return Err(error(element.offset, "document has more than one root element")),
        }
        Ok(())
    };

    loop {
        let offset = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if stack.len() >= max_depth {
                    log::warn!("Rejecting GML input nested deeper than {max_depth} elements");
                    return Err(error(
                        offset,
                        format!("element nesting exceeds {max_depth} levels"),
                    ));
                }
                stack.push(Element::start(&start, offset)?);
            }
            Ok(Event::Empty(start)) => {
                let element = Element::start(&start, offset)?;
                attach(&mut stack, element)?;
            }
            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, element)?;
                }
            }
            Ok(Event::Text(text)) => match stack.last_mut() {
                Some(element) => element.text.push_str(&String::from_utf8_lossy(&text)),
                None => return Err(error(offset, "text outside of the root element")),
            },
            Ok(Event::CData(text)) => match stack.last_mut() {
                Some(element) => element.text.push_str(&String::from_utf8_lossy(&text)),
                None => return Err(error(offset, "text outside of the root element")),
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(error(reader.error_position() as usize, err.to_string())),
        }
    }

    if let Some(element) = stack.last() {
        return Err(error(
            markup.len(),
            format!("element `{}` is not closed", element.name),
        ));
    }

    root.ok_or_else(|| error(0, "no geometry element"))
}

struct Interpreter {
    srid: CoordinateSystemId,
    options: CodecOptions,
}

impl Interpreter {
    fn check_srs_name(&self, element: &Element) -> Result<(), GeographyError> {
        let Some(name) = element.attribute("srsName") else {
            return Ok(());
        };

        let id = name
            .rsplit(['/', ':', '#'])
            .next()
            .and_then(|code| code.parse::<i32>().ok())
            .ok_or_else(|| {
                error(
                    element.offset,
                    format!("unsupported srsName `{name}`"),
                )
            })?;

        self.srid.ensure_same(CoordinateSystemId::new(id))
    }

    /// Number of ordinates per position declared by `srsDimension` on the element, or the inherited value.
    fn dimension(&self, element: &Element, inherited: Option<usize>) -> Result<Option<usize>, ParseError> {
        match element.attribute("srsDimension") {
            None => Ok(inherited),
            Some(value) => match value.trim().parse::<usize>() {
                Ok(dimension @ 2..=4) => Ok(Some(dimension)),
                _ => Err(error(
                    element.offset,
                    format!("invalid srsDimension `{value}`"),
                )),
            },
        }
    }

    fn layout(&self, dimension: usize) -> Layout {
        match dimension {
            2 => Layout::XY,
            3 => match self.options.three_ordinates() {
                ThirdOrdinate::Elevation => Layout::XYZ,
                ThirdOrdinate::Measure => Layout::XYM,
            },
            _ => Layout::XYZM,
        }
    }

    fn geometry(
        &self,
        element: &Element,
        depth: usize,
        dimension: Option<usize>,
    ) -> Result<Geom, GeographyError> {
        let kind = ShapeKind::from_gml_element(&element.name).ok_or_else(|| {
            error(
                element.offset,
                format!("unknown geometry element `{}`", element.name),
            )
        })?;

        if depth > self.options.max_depth() {
            log::warn!("Rejecting GML input nested deeper than {}", self.options.max_depth());
            return Err(error(
                element.offset,
                format!("geometry nesting exceeds {} levels", self.options.max_depth()),
            )
            .into());
        }

        self.check_srs_name(element)?;
        let dimension = self.dimension(element, dimension)?;

        let geom = match kind {
            ShapeKind::Point => Geom::Point(self.point(element, dimension)?),
            ShapeKind::LineString => Geom::LineString(self.line_string(element, dimension)?),
            ShapeKind::Polygon => Geom::Polygon(self.polygon(element, dimension)?),
            ShapeKind::MultiPoint => {
                let mut parts = vec![];
                for member in self.members(element, "pointMember", "pointMembers", ShapeKind::Point)? {
                    self.check_srs_name(member)?;
                    let dimension = self.dimension(member, dimension)?;
                    parts.push(self.point(member, dimension)?);
                }
                Geom::MultiPoint(parts.into())
            }
            ShapeKind::MultiLineString => {
                let mut parts = vec![];
                for member in
                    self.members(element, "curveMember", "curveMembers", ShapeKind::LineString)?
                {
                    self.check_srs_name(member)?;
                    let dimension = self.dimension(member, dimension)?;
                    parts.push(self.line_string(member, dimension)?);
                }
                Geom::MultiLineString(parts.into())
            }
            ShapeKind::MultiPolygon => {
                let mut parts = vec![];
                for member in
                    self.members(element, "surfaceMember", "surfaceMembers", ShapeKind::Polygon)?
                {
                    self.check_srs_name(member)?;
                    let dimension = self.dimension(member, dimension)?;
                    parts.push(self.polygon(member, dimension)?);
                }
                Geom::MultiPolygon(parts.into())
            }
            ShapeKind::GeometryCollection => {
                let mut members = vec![];
                for child in &element.children {
                    match child.name.as_str() {
                        "geometryMember" | "geometryMembers" => {
                            if child.name == "geometryMember" && child.children.len() != 1 {
                                return Err(error(
                                    child.offset,
                                    "geometryMember must contain exactly one geometry",
                                )
                                .into());
                            }
                            for member in &child.children {
                                members.push(self.geometry(member, depth + 1, dimension)?);
                            }
                        }
                        _ => return Err(element.unexpected_child(child).into()),
                    }
                }
                Geom::GeometryCollection(members)
            }
        };

        Ok(geom)
    }

    /// Collects member geometry elements of a multi-geometry. Members can be wrapped one by one (`single`) or all
    /// together (`plural`), but must be of the `kind`.
    fn members<'e>(
        &self,
        element: &'e Element,
        single: &str,
        plural: &str,
        kind: ShapeKind,
    ) -> Result<Vec<&'e Element>, ParseError> {
        let mut members = vec![];
        for child in &element.children {
            if child.name == single {
                if child.children.len() != 1 {
                    return Err(error(
                        child.offset,
                        format!("{single} must contain exactly one geometry"),
                    ));
                }
            } else if child.name != plural {
                return Err(element.unexpected_child(child));
            }

            for member in &child.children {
                if member.name != kind.gml_element() {
                    return Err(error(
                        member.offset,
                        format!(
                            "expected `{}` in `{}`, found `{}`",
                            kind.gml_element(),
                            element.name,
                            member.name
                        ),
                    ));
                }
                members.push(member);
            }
        }

        Ok(members)
    }

    fn coordinates(
        &self,
        element: &Element,
        dimension: Option<usize>,
    ) -> Result<Vec<Coordinate>, ParseError> {
        let dimension = self.dimension(element, dimension)?.unwrap_or(2);
        let layout = self.layout(dimension);

        let mut values = vec![];
        for token in element.text.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| {
                error(element.offset, format!("invalid number `{token}`"))
            })?;
            values.push(value);
        }

        if values.len() % dimension != 0 {
            return Err(error(
                element.offset,
                format!(
                    "{} ordinates cannot be split into positions of {dimension}",
                    values.len()
                ),
            ));
        }

        values
            .chunks_exact(dimension)
            .map(|chunk| {
                let (lon, lat) = (chunk[0], chunk[1]);
                let (z, m) = match (layout.has_z, layout.has_m) {
                    (true, true) => (Some(chunk[2]), Some(chunk[3])),
                    (true, false) => (Some(chunk[2]), None),
                    (false, true) => (None, Some(chunk[2])),
                    (false, false) => (None, None),
                };
                Coordinate::check_ordinates(lon, lat, z, m)
                    .map_err(|reason| error(element.offset, reason))?;

                Ok(Coordinate::from_ordinates(lon, lat, z, m))
            })
            .collect()
    }

    /// Positions of a curve given either as one `posList` or as a sequence of `pos` elements.
    fn positions(
        &self,
        element: &Element,
        dimension: Option<usize>,
    ) -> Result<Vec<Coordinate>, ParseError> {
        let mut positions = vec![];
        for child in &element.children {
            match child.name.as_str() {
                "posList" if element.children.len() == 1 => {
                    positions = self.coordinates(child, dimension)?;
                }
                "pos" => {
                    let coordinates = self.coordinates(child, dimension)?;
                    if coordinates.len() != 1 {
                        return Err(error(child.offset, "pos must contain exactly one position"));
                    }
                    positions.extend(coordinates);
                }
                _ => return Err(element.unexpected_child(child)),
            }
        }

        Ok(positions)
    }

    fn point(&self, element: &Element, dimension: Option<usize>) -> Result<Point, ParseError> {
        let mut point = Point::empty();
        for child in &element.children {
            if child.name != "pos" || !point.is_empty() {
                return Err(element.unexpected_child(child));
            }

            let mut coordinates = self.coordinates(child, dimension)?.into_iter();
            point = match (coordinates.next(), coordinates.next()) {
                (None, _) => Point::empty(),
                (Some(coordinate), None) => Point::new(coordinate),
                (Some(_), Some(_)) => {
                    return Err(error(child.offset, "pos must contain exactly one position"))
                }
            };
        }

        Ok(point)
    }

    fn line_string(
        &self,
        element: &Element,
        dimension: Option<usize>,
    ) -> Result<LineString, ParseError> {
        let positions = self.positions(element, dimension)?;
        LineString::validate(&positions).map_err(|reason| error(element.offset, reason))?;
        Ok(LineString::from_valid(positions))
    }

    fn ring(&self, element: &Element, dimension: Option<usize>) -> Result<LinearRing, ParseError> {
        let [ring] = element.children.as_slice() else {
            return Err(error(
                element.offset,
                format!("`{}` must contain exactly one LinearRing", element.name),
            ));
        };

        if ring.name != "LinearRing" {
            return Err(element.unexpected_child(ring));
        }

        let dimension = self.dimension(ring, dimension)?;
        let positions = self.positions(ring, dimension)?;
        LinearRing::validate(&positions).map_err(|reason| error(ring.offset, reason))?;
        Ok(LinearRing::from_valid(positions))
    }

    fn polygon(&self, element: &Element, dimension: Option<usize>) -> Result<Polygon, ParseError> {
        let mut rings = vec![];
        for (index, child) in element.children.iter().enumerate() {
            match child.name.as_str() {
                "exterior" if index == 0 => rings.push(self.ring(child, dimension)?),
                "interior" if index > 0 => rings.push(self.ring(child, dimension)?),
                _ => return Err(element.unexpected_child(child)),
            }
        }

        Polygon::validate(&rings).map_err(|reason| error(element.offset, reason))?;
        Ok(Polygon::from_rings(rings))
    }
}
