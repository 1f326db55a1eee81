// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Point types used by the tracker

use kurbo::{Affine, Point, Vec2};

/// A point whose axes may be unspecified.
///
/// A `None` axis is not zero: it means "inherit this axis from the point
/// being merged against". Horizontal and vertical line commands only ever
/// specify one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialPoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl PartialPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Only the x axis is specified
    pub const fn x(x: f64) -> Self {
        Self {
            x: Some(x),
            y: None,
        }
    }

    /// Only the y axis is specified
    pub const fn y(y: f64) -> Self {
        Self {
            x: None,
            y: Some(y),
        }
    }

    /// Offset each specified axis; unspecified axes stay unspecified
    pub fn offset(self, by: Vec2) -> Self {
        Self {
            x: self.x.map(|x| x + by.x),
            y: self.y.map(|y| y + by.y),
        }
    }

    /// Fill unspecified axes from `fallback`, or from zero if there is none
    pub fn merge(self, fallback: Option<Point>) -> Point {
        let fallback = fallback.unwrap_or(Point::ORIGIN);
        Point::new(self.x.unwrap_or(fallback.x), self.y.unwrap_or(fallback.y))
    }
}

impl From<Point> for PartialPoint {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for PartialPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Which kind of curve recorded a control point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Second control point of a cubic curve
    Cubic,
    /// The single control point of a quadratic curve
    Quadratic,
}

/// The last control point drawn, tagged with its curve kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub point: Point,
    pub kind: CurveKind,
}

impl ControlPoint {
    pub const fn cubic(point: Point) -> Self {
        Self {
            point,
            kind: CurveKind::Cubic,
        }
    }

    pub const fn quadratic(point: Point) -> Self {
        Self {
            point,
            kind: CurveKind::Quadratic,
        }
    }

    pub fn offset(self, by: Vec2) -> Self {
        Self {
            point: self.point + by,
            ..self
        }
    }

    pub fn transformed(self, affine: &Affine) -> Self {
        Self {
            point: *affine * self.point,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_keeps_missing_axis() {
        let p = PartialPoint::x(5.0).offset(Vec2::new(10.0, 20.0));
        assert_eq!(p.x, Some(15.0));
        assert_eq!(p.y, None);
    }

    #[test]
    fn test_merge_fills_from_fallback() {
        let merged = PartialPoint::y(7.0).merge(Some(Point::new(3.0, 4.0)));
        assert_eq!(merged, Point::new(3.0, 7.0));
    }

    #[test]
    fn test_merge_without_fallback_uses_zero() {
        assert_eq!(PartialPoint::x(2.0).merge(None), Point::new(2.0, 0.0));
    }
}
