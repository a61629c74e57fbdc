//! Minimal planar geometry: a point set with a WKT subset for literals.
//!
//! Only bounding boxes participate in comparisons, so shapes are stored as
//! flat coordinate lists. Polygon rings and multi-part members are flattened.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

///
/// GeometryKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    Polygon,
}

impl GeometryKind {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Point => "POINT",
            Self::MultiPoint => "MULTIPOINT",
            Self::LineString => "LINESTRING",
            Self::Polygon => "POLYGON",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "POINT" => Some(Self::Point),
            "MULTIPOINT" => Some(Self::MultiPoint),
            "LINESTRING" => Some(Self::LineString),
            "POLYGON" => Some(Self::Polygon),
            _ => None,
        }
    }

    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Point => 0,
            Self::MultiPoint => 1,
            Self::LineString => 2,
            Self::Polygon => 3,
        }
    }
}

///
/// Point
///

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

///
/// BoundingBox
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Closed-interval intersection; touching edges intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

///
/// Geometry
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Geometry {
    kind: GeometryKind,
    points: Vec<Point>,
}

impl Geometry {
    #[must_use]
    pub const fn new(kind: GeometryKind, points: Vec<Point>) -> Self {
        Self { kind, points }
    }

    #[must_use]
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(GeometryKind::Point, vec![Point { x, y }])
    }

    #[must_use]
    pub const fn kind(&self) -> GeometryKind {
        self.kind
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Parse `KIND (x y, x y, ...)`; nested parentheses are flattened and
    /// `KIND EMPTY` yields a geometry without points.
    #[must_use]
    pub fn parse_wkt(source: &str) -> Option<Self> {
        let source = source.trim();
        let keyword_end = source
            .find(|c: char| c == '(' || c.is_whitespace())
            .unwrap_or(source.len());
        let kind = GeometryKind::from_keyword(&source[..keyword_end])?;
        let body = source[keyword_end..].trim();

        if body.eq_ignore_ascii_case("EMPTY") {
            return Some(Self::new(kind, Vec::new()));
        }
        if !body.starts_with('(') || !body.ends_with(')') || !balanced(body) {
            return None;
        }

        let mut points = Vec::new();
        let flattened = body.replace(['(', ')'], " ");
        for pair in flattened.split(',') {
            let mut coords = pair.split_whitespace();
            let x = coords.next()?.parse::<f64>().ok()?;
            let y = coords.next()?.parse::<f64>().ok()?;
            if coords.next().is_some() {
                return None;
            }
            points.push(Point { x, y });
        }
        if kind == GeometryKind::Point && points.len() != 1 {
            return None;
        }

        Some(Self::new(kind, points))
    }

    #[must_use]
    pub fn to_wkt(&self) -> String {
        let mut out = String::from(self.kind.keyword());
        if self.points.is_empty() {
            out.push_str(" EMPTY");
            return out;
        }

        let (open, close) = match self.kind {
            GeometryKind::Polygon => (" ((", "))"),
            _ => (" (", ")"),
        };
        out.push_str(open);
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            // Writing into a String cannot fail.
            let _ = write!(out, "{} {}", point.x, point.y);
        }
        out.push_str(close);
        out
    }

    /// Bounding box of all points; `None` for an empty geometry.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let (first, rest) = self.points.split_first()?;
        let mut bbox = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for point in rest {
            bbox.min_x = bbox.min_x.min(point.x);
            bbox.min_y = bbox.min_y.min(point.y);
            bbox.max_x = bbox.max_x.max(point.x);
            bbox.max_y = bbox.max_y.max(point.y);
        }

        Some(bbox)
    }

    /// Bounding-box overlap test backing the `&&` operator.
    #[must_use]
    pub fn intersects_bounding_box(&self, other: &Self) -> bool {
        match (self.bounding_box(), other.bounding_box()) {
            (Some(left), Some(right)) => left.intersects(&right),
            _ => false,
        }
    }
}

fn balanced(body: &str) -> bool {
    let mut depth = 0usize;
    for c in body.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    depth == 0
}
