// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Bezier helpers for quadratic elevation and smooth-curve reflection

use kurbo::{Point, QuadBez};

/// Elevate a quadratic bezier (start, control, end) to the two control
/// points of the equivalent cubic.
///
/// `c1 = p0 + 2/3 (p1 - p0)`, `c2 = p2 - 2/3 (p2 - p1)`.
pub fn quadratic_to_cubic(p0: Point, p1: Point, p2: Point) -> (Point, Point) {
    let cubic = QuadBez::new(p0, p1, p2).raise();
    (cubic.p1, cubic.p2)
}

/// Reflect `prior` about `current`.
///
/// Smooth curve commands use this to infer their first control point from
/// the previous curve's last control point.
pub fn reflect(current: Point, prior: Point) -> Point {
    current + (current - prior)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::assert_point_near;

    #[test]
    fn test_reflect_is_involution() {
        let current = Point::new(12.5, -3.0);
        let control = Point::new(-40.0, 77.25);
        assert_point_near(reflect(current, reflect(current, control)), control);
    }

    #[test]
    fn test_reflect_about_curve_end() {
        let reflected = reflect(Point::new(100.0, 0.0), Point::new(50.0, 100.0));
        assert_eq!(reflected, Point::new(150.0, -100.0));
    }

    #[test]
    fn test_quadratic_elevation() {
        let (c1, c2) = quadratic_to_cubic(
            Point::new(0.0, 0.0),
            Point::new(60.0, 90.0),
            Point::new(90.0, 0.0),
        );
        assert_point_near(c1, Point::new(40.0, 60.0));
        assert_point_near(c2, Point::new(70.0, 60.0));
    }

    #[test]
    fn test_degenerate_quadratic_is_straight() {
        let p0 = Point::new(0.0, 0.0);
        let p2 = Point::new(30.0, 30.0);
        let (c1, c2) = quadratic_to_cubic(p0, p0, p2);
        assert_point_near(c1, p0);
        assert_point_near(c2, Point::new(10.0, 10.0));
    }
}
