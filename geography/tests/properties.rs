use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use geography::{
    CoordinateSystemId, Geography, GeographyError, ParseError, ShapeKind, WireFormat,
    DEFAULT_COORDINATE_SYSTEM_ID,
};

const SAMPLES: &[&str] = &[
    "POINT (-122.35 47.62)",
    "POINT EMPTY",
    "POINT Z (1 2 3)",
    "POINT M (1 2 4)",
    "POINT ZM (1.5 -2.25 3 4)",
    "LINESTRING EMPTY",
    "LINESTRING (0 0, 1 1, 2 0.5)",
    "LINESTRING Z (0 0 10, 1 1 20)",
    "POLYGON EMPTY",
    "POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0), (1 1, 2 1, 2 2, 1 2, 1 1))",
    "POLYGON ZM ((0 0 1 2, 1 0 1 2, 1 1 1 2, 0 0 1 2))",
    "MULTIPOINT EMPTY",
    "MULTIPOINT ((1 2), EMPTY, (3 4))",
    "MULTILINESTRING ((0 0, 1 1), EMPTY, (2 2, 3 3, 4 2))",
    "MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)), EMPTY, ((5 5, 6 5, 6 6, 5 5)))",
    "GEOMETRYCOLLECTION EMPTY",
    "GEOMETRYCOLLECTION (POINT (1 2), LINESTRING EMPTY, GEOMETRYCOLLECTION (POLYGON ((0 0, 1 0, 1 1, 0 0))))",
    "GEOMETRYCOLLECTION Z (POINT Z (1 2 3), MULTIPOINT Z ((4 5 6)))",
];

fn samples() -> impl Iterator<Item = Geography> {
    SAMPLES
        .iter()
        .map(|text| Geography::from_text(text).expect("sample must parse"))
}

fn non_empty_samples() -> impl Iterator<Item = Geography> {
    samples().filter(|value| !value.is_empty())
}

#[test]
fn text_round_trip_is_2d_projection() {
    for value in samples() {
        let parsed = Geography::from_text(&value.as_text()).unwrap();
        assert_eq!(parsed, value.to_xy(), "{}", value.as_text_full());
    }
}

#[test]
fn full_text_round_trip_is_exact() {
    for value in samples() {
        let parsed = Geography::from_text(&value.as_text_full()).unwrap();
        assert_eq!(parsed, value);
    }
}

#[test]
fn binary_round_trip_is_exact() {
    for value in samples() {
        let parsed = Geography::from_binary(&value.as_binary()).unwrap();
        assert_eq!(parsed, value, "{}", value.as_text_full());
    }
}

#[test]
fn markup_round_trip_keeps_the_shape() {
    for value in samples() {
        let parsed = Geography::from_gml(&value.as_gml()).unwrap();
        assert_eq!(parsed.to_xy(), value.to_xy(), "{}", value.as_gml());
    }
}

#[test]
fn spatial_equality_is_reflexive_and_symmetric() {
    let values: Vec<_> = samples().collect();
    for a in &values {
        assert!(a.spatial_equals(a).unwrap(), "{}", a.as_text());
        for b in &values {
            assert_eq!(
                a.spatial_equals(b).unwrap(),
                b.spatial_equals(a).unwrap(),
                "{} vs {}",
                a.as_text(),
                b.as_text()
            );
        }
    }
}

#[test]
fn disjoint_is_the_negation_of_intersects() {
    let values: Vec<_> = non_empty_samples().collect();
    for a in &values {
        for b in &values {
            assert_eq!(a.disjoint(b).unwrap(), !a.intersects(b).unwrap());
        }
    }
}

#[test]
fn distance_to_itself_is_zero() {
    for value in non_empty_samples() {
        assert_eq!(value.distance(&value).unwrap(), Some(0.0), "{}", value.as_text());
    }
}

#[test]
fn point_from_text() {
    let value = Geography::from_text("POINT (-122.35 47.62)").unwrap();
    assert_eq!(value.kind(), ShapeKind::Point);
    assert_eq!(value.coordinate_system_id(), DEFAULT_COORDINATE_SYSTEM_ID);
    assert_eq!(value.longitude(), Some(-122.35));
    assert_eq!(value.latitude(), Some(47.62));
    assert_eq!(value.elevation(), None);
    assert_eq!(value.measure(), None);
    assert_eq!(value.as_text(), "POINT (-122.35 47.62)");
    assert_eq!(value.to_string(), "SRID=4326;POINT (-122.35 47.62)");
}

#[test]
fn empty_line_string() {
    let value = Geography::from_text("LINESTRING EMPTY").unwrap();
    assert_eq!(value.kind(), ShapeKind::LineString);
    assert!(value.is_empty());
    assert_eq!(value.point_count(), Some(0));
    assert_eq!(value.length(), Some(0.0));
}

#[test]
fn degenerate_ring_is_a_parse_error() {
    assert_matches!(
        Geography::from_text("POLYGON ((0 0, 0 0, 0 0))"),
        Err(GeographyError::Parse(ParseError {
            format: WireFormat::Text,
            ..
        }))
    );
}

#[test]
fn negative_buffer() {
    let point = Geography::from_text("POINT (0 0)").unwrap();
    assert_matches!(
        point.buffer(Some(-1.0)),
        Err(GeographyError::InvalidArgument { .. })
    );

    let polygon = Geography::from_text("POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0))").unwrap();
    let eroded = polygon.buffer(Some(-1.0)).unwrap();
    assert_abs_diff_eq!(eroded.area().unwrap(), 64.0, epsilon = 1e-9);
    assert!(polygon.spatial_equals(&polygon.union(&eroded).unwrap()).unwrap());

    let gone = polygon.buffer(Some(-6.0)).unwrap();
    assert!(gone.is_empty());
    assert_eq!(gone.kind(), ShapeKind::Polygon);
}

#[test]
fn truncated_binary_is_a_parse_error() {
    // Line string declaring 1000 positions with only one present.
    let mut bytes = vec![1, 2, 0, 0, 0];
    bytes.extend_from_slice(&1000u32.to_le_bytes());
    bytes.extend_from_slice(&1.0f64.to_le_bytes());
    bytes.extend_from_slice(&2.0f64.to_le_bytes());

    assert_matches!(
        Geography::from_binary(&bytes),
        Err(GeographyError::Parse(ParseError {
            format: WireFormat::Binary,
            ..
        }))
    );

    for len in 0..bytes.len() {
        assert_matches!(
            Geography::from_binary(&bytes[..len]),
            Err(GeographyError::Parse(_))
        );
    }
}

#[test]
fn operations_between_coordinate_systems_fail() {
    let a = Geography::from_text("POINT (1 2)").unwrap();
    let b = Geography::from_text_with_srid("POINT (1 2)", CoordinateSystemId::new(3857)).unwrap();

    assert_matches!(
        a.spatial_equals(&b),
        Err(GeographyError::CoordinateSystemMismatch { .. })
    );
    assert_matches!(
        a.symmetric_difference(&b),
        Err(GeographyError::CoordinateSystemMismatch { .. })
    );
    assert_matches!(
        Geography::collection(DEFAULT_COORDINATE_SYSTEM_ID, vec![a, b]),
        Err(GeographyError::CoordinateSystemMismatch { .. })
    );
}

#[test]
fn hostile_nesting_is_rejected() {
    let depth = 10_000;
    let text = format!(
        "{}POINT (1 2){}",
        "GEOMETRYCOLLECTION (".repeat(depth),
        ")".repeat(depth)
    );
    assert_matches!(Geography::from_text(&text), Err(GeographyError::Parse(_)));

    let mut bytes = vec![];
    for _ in 0..depth {
        bytes.push(1);
        bytes.extend_from_slice(&7u32.to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());
    }
    assert_matches!(Geography::from_binary(&bytes), Err(GeographyError::Parse(_)));

    let markup = format!(
        "{}<Point><pos>1 2</pos></Point>{}",
        "<MultiGeometry><geometryMember>".repeat(depth),
        "</geometryMember></MultiGeometry>".repeat(depth)
    );
    assert_matches!(Geography::from_gml(&markup), Err(GeographyError::Parse(_)));
}

#[test]
fn crossing_rings_are_rejected() {
    for text in [
        "POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0), (3 3, 6 3, 6 6, 3 6, 3 3))",
        "POLYGON ((0 0, 4 0, 0 4, 4 4, 0 0))",
        "MULTIPOLYGON (((0 0, 4 0, 0 4, 4 4, 0 0)))",
    ] {
        assert_matches!(
            Geography::from_text(text),
            Err(GeographyError::Parse(ParseError {
                format: WireFormat::Text,
                ..
            })),
            "{text}"
        );
    }
}

#[test]
fn infinite_elevation_is_rejected() {
    let mut bytes = vec![1];
    bytes.extend_from_slice(&1001u32.to_le_bytes());
    for ordinate in [1.0, 2.0, f64::INFINITY] {
        bytes.extend_from_slice(&ordinate.to_le_bytes());
    }

    assert_matches!(
        Geography::from_binary(&bytes),
        Err(GeographyError::Parse(ParseError {
            format: WireFormat::Binary,
            ..
        }))
    );
    assert_matches!(
        Geography::from_gml(r#"<Point srsDimension="3"><pos>1 2 -inf</pos></Point>"#),
        Err(GeographyError::Parse(_))
    );
}

#[test]
fn adjacent_rectangles_union_to_the_whole() {
    let whole = Geography::from_text("POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0))").unwrap();
    let left = Geography::from_text("POLYGON ((0 0, 3.3 0, 3.3 10, 0 10, 0 0))").unwrap();
    let right = Geography::from_text("POLYGON ((3.3 0, 10 0, 10 10, 3.3 10, 3.3 0))").unwrap();

    let union = left.union(&right).unwrap();
    assert!(union.spatial_equals(&whole).unwrap(), "{}", union.as_text());
    assert_abs_diff_eq!(union.area().unwrap(), 100.0, epsilon = 1e-9);

    let reparsed = Geography::from_text(&union.as_text_full()).unwrap();
    assert_eq!(reparsed, union);
}
