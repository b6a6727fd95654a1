use crate::config::{CodecOptions, ThirdOrdinate};
use crate::contour::{LineString, LinearRing};
use crate::coordinate::{Coordinate, Layout};
use crate::error::{ParseError, WireFormat};
use crate::geometry::Geom;
use crate::geometry_type::ShapeKind;
use crate::point::Point;
use crate::polygon::Polygon;

/// Parses a well-known text string into a shape.
pub fn parse(text: &str, options: &CodecOptions) -> Result<Geom, ParseError> {
    let mut parser = Parser::new(text, *options);
    let geom = parser.geometry(1)?;

    match parser.next()? {
        (Token::End, _) => Ok(geom),
        (token, offset) => Err(error(
            offset,
            format!("unexpected {} after the end of geometry", token.describe()),
        )),
    }
}

fn error(offset: usize, message: impl Into<String>) -> ParseError {
    ParseError::new(WireFormat::Text, offset, message)
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Token<'a> {
    Word(&'a str),
    Number(f64),
    LeftParen,
    RightParen,
    Comma,
    End,
}

impl Token<'_> {
    fn describe(&self) -> String {
        match self {
            Token::Word(word) => format!("`{word}`"),
            Token::Number(value) => format!("number {value}"),
            Token::LeftParen => "`(`".into(),
            Token::RightParen => "`)`".into(),
            Token::Comma => "`,`".into(),
            Token::End => "end of input".into(),
        }
    }

    fn is_word(&self, expected: &str) -> bool {
        matches!(self, Token::Word(word) if word.eq_ignore_ascii_case(expected))
    }
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn next_token(&mut self) -> Result<(Token<'a>, usize), ParseError> {
        let bytes = self.input.as_bytes();
        while bytes.get(self.pos).is_some_and(u8::is_ascii_whitespace) {
            self.pos += 1;
        }

        let start = self.pos;
        let Some(&first) = bytes.get(start) else {
            return Ok((Token::End, start));
        };

        let token = match first {
            b'(' => {
                self.pos += 1;
                Token::LeftParen
            }
            b')' => {
                self.pos += 1;
                Token::RightParen
            }
            b',' => {
                self.pos += 1;
                Token::Comma
            }
            b'+' | b'-' | b'.' | b'0'..=b'9' => {
                while bytes
                    .get(self.pos)
                    .is_some_and(|b| matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E'))
                {
                    self.pos += 1;
                }

                let text = &self.input[start..self.pos];
                let value = text
                    .parse::<f64>()
                    .map_err(|_| error(start, format!("invalid number `{text}`")))?;
                Token::Number(value)
            }
            b if b.is_ascii_alphabetic() => {
                while bytes
                    .get(self.pos)
                    .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
                {
                    self.pos += 1;
                }

                Token::Word(&self.input[start..self.pos])
            }
            _ => {
                let c = self.input[start..].chars().next().unwrap_or_default();
                return Err(error(start, format!("unexpected character `{c}`")));
            }
        };

        Ok((token, start))
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<(Token<'a>, usize)>,
    options: CodecOptions,
    layout: Option<Layout>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: CodecOptions) -> Self {
        Self {
            lexer: Lexer { input, pos: 0 },
            peeked: None,
            options,
            layout: None,
        }
    }

    fn peek(&mut self) -> Result<(Token<'a>, usize), ParseError> {
        match self.peeked {
            Some(peeked) => Ok(peeked),
            None => {
                let token = self.lexer.next_token()?;
                self.peeked = Some(token);
                Ok(token)
            }
        }
    }

    fn next(&mut self) -> Result<(Token<'a>, usize), ParseError> {
        match self.peeked.take() {
            Some(peeked) => Ok(peeked),
            None => self.lexer.next_token(),
        }
    }

    fn expect(&mut self, expected: Token<'static>) -> Result<usize, ParseError> {
        let (token, offset) = self.next()?;
        if token == expected {
            Ok(offset)
        } else {
            Err(error(
                offset,
                format!("expected {}, found {}", expected.describe(), token.describe()),
            ))
        }
    }

    /// Consumes the `EMPTY` keyword if it is next.
    fn take_empty(&mut self) -> Result<bool, ParseError> {
        if self.peek()?.0.is_word("EMPTY") {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn geometry(&mut self, depth: usize) -> Result<Geom, ParseError> {
        let (token, offset) = self.next()?;
        let Token::Word(keyword) = token else {
            return Err(error(
                offset,
                format!("expected geometry type, found {}", token.describe()),
            ));
        };

        let kind = ShapeKind::from_wkt_keyword(keyword)
            .ok_or_else(|| error(offset, format!("unknown geometry type `{keyword}`")))?;

        if depth > self.options.max_depth() {
            log::warn!("Rejecting WKT input nested deeper than {}", self.options.max_depth());
            return Err(error(
                offset,
                format!("geometry nesting exceeds {} levels", self.options.max_depth()),
            ));
        }

        self.layout_marker()?;
        if self.take_empty()? {
            return Ok(Geom::empty(kind));
        }

        let geom = match kind {
            ShapeKind::Point => {
                self.expect(Token::LeftParen)?;
                let coordinate = self.coordinate()?;
                self.expect(Token::RightParen)?;
                Geom::Point(Point::new(coordinate))
            }
            ShapeKind::LineString => Geom::LineString(self.line_string()?),
            ShapeKind::Polygon => Geom::Polygon(self.polygon()?),
            ShapeKind::MultiPoint => Geom::MultiPoint(self.list(Self::multi_point_member)?.into()),
            ShapeKind::MultiLineString => Geom::MultiLineString(
                self.list(|p| {
                    if p.take_empty()? {
                        Ok(LineString::empty())
                    } else {
                        p.line_string()
                    }
                })?
                .into(),
            ),
            ShapeKind::MultiPolygon => Geom::MultiPolygon(
                self.list(|p| {
                    if p.take_empty()? {
                        Ok(Polygon::empty())
                    } else {
                        p.polygon()
                    }
                })?
                .into(),
            ),
            ShapeKind::GeometryCollection => {
                Geom::GeometryCollection(self.list(|p| p.geometry(depth + 1))?)
            }
        };

        Ok(geom)
    }

    fn layout_marker(&mut self) -> Result<(), ParseError> {
        let (token, offset) = self.peek()?;
        let declared = if token.is_word("Z") {
            Layout::XYZ
        } else if token.is_word("M") {
            Layout::XYM
        } else if token.is_word("ZM") {
            Layout::XYZM
        } else {
            return Ok(());
        };

        self.next()?;
        match self.layout {
            None => {
                self.layout = Some(declared);
                Ok(())
            }
            Some(layout) if layout == declared => Ok(()),
            Some(_) => Err(error(
                offset,
                "dimension marker conflicts with the rest of the geometry",
            )),
        }
    }

    /// Parses `( item, item, ... )` with at least one item.
    fn list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        self.expect(Token::LeftParen)?;
        let mut items = vec![item(self)?];
        loop {
            match self.next()? {
                (Token::Comma, _) => items.push(item(self)?),
                (Token::RightParen, _) => return Ok(items),
                (token, offset) => {
                    return Err(error(
                        offset,
                        format!("expected `,` or `)`, found {}", token.describe()),
                    ))
                }
            }
        }
    }

    fn coordinate(&mut self) -> Result<Coordinate, ParseError> {
        let start = self.peek()?.1;
        let mut ordinates = [0.0; 4];
        let mut count = 0;

        loop {
            let (token, offset) = self.peek()?;
            let value = match token {
                Token::Number(value) => value,
                token if token.is_word("NaN") => f64::NAN,
                _ => break,
            };

            if count == ordinates.len() {
                return Err(error(offset, "coordinate has more than 4 ordinates"));
            }

            self.next()?;
            ordinates[count] = value;
            count += 1;
        }

        if count < 2 {
            return Err(error(start, "coordinate must have at least 2 ordinates"));
        }

        let layout = match self.layout {
            Some(layout) if layout.ordinate_count() == count => layout,
            Some(layout) => {
                return Err(error(
                    start,
                    format!(
                        "expected {} ordinates, found {count}",
                        layout.ordinate_count()
                    ),
                ))
            }
            None => {
                let layout = match count {
                    2 => Layout::XY,
                    3 => match self.options.three_ordinates() {
                        ThirdOrdinate::Elevation => Layout::XYZ,
                        ThirdOrdinate::Measure => Layout::XYM,
                    },
                    _ => Layout::XYZM,
                };
                self.layout = Some(layout);
                layout
            }
        };

        let [lon, lat, third, fourth] = ordinates;
        let (z, m) = match (layout.has_z, layout.has_m) {
            (true, true) => (Some(third), Some(fourth)),
            (true, false) => (Some(third), None),
            (false, true) => (None, Some(third)),
            (false, false) => (None, None),
        };
        Coordinate::check_ordinates(lon, lat, z, m).map_err(|reason| error(start, reason))?;

        Ok(Coordinate::from_ordinates(lon, lat, z, m))
    }

    fn line_string(&mut self) -> Result<LineString, ParseError> {
        let start = self.peek()?.1;
        let points = self.list(Self::coordinate)?;
        LineString::validate(&points).map_err(|reason| error(start, reason))?;
        Ok(LineString::from_valid(points))
    }

    fn ring(&mut self) -> Result<LinearRing, ParseError> {
        let start = self.peek()?.1;
        let points = self.list(Self::coordinate)?;
        LinearRing::validate(&points).map_err(|reason| error(start, reason))?;
        Ok(LinearRing::from_valid(points))
    }

    fn polygon(&mut self) -> Result<Polygon, ParseError> {
        let start = self.peek()?.1;
        let rings = self.list(Self::ring)?;
        Polygon::validate(&rings).map_err(|reason| error(start, reason))?;
        Ok(Polygon::from_rings(rings))
    }

    /// Multipoint members are written either as `(x y)`, as bare `x y` or as `EMPTY`.
    fn multi_point_member(&mut self) -> Result<Point, ParseError> {
        if self.take_empty()? {
            return Ok(Point::empty());
        }

        if self.peek()?.0 == Token::LeftParen {
            self.next()?;
            let coordinate = self.coordinate()?;
            self.expect(Token::RightParen)?;
            Ok(Point::new(coordinate))
        } else {
            Ok(Point::new(self.coordinate()?))
        }
    }
}
