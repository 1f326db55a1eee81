// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Circular arc parameterization
//!
//! Arcs reach the rendering engine in center form (center, radius, start
//! and end angle). Path commands describe them in endpoint form, so this
//! module converts between the two. Elliptical arcs are never solved
//! directly: they are mapped to a unit circle by a rotate + scale
//! transform and then handled as circular arcs.

use kurbo::{Affine, Point, Vec2};
use std::f64::consts::FRAC_PI_2;

/// An angle, stored in radians
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    /// Full turn
    pub const FULL: Angle = Angle(std::f64::consts::TAU);

    /// Create an angle from degrees
    pub fn degrees(degrees: f64) -> Self {
        Self(degrees.to_radians())
    }

    /// Create an angle from radians
    pub const fn radians(radians: f64) -> Self {
        Self(radians)
    }

    pub fn to_radians(self) -> f64 {
        self.0
    }

    pub fn to_degrees(self) -> f64 {
        self.0.to_degrees()
    }
}

/// Large-arc flag of an endpoint arc
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LargeArc(pub bool);

impl Default for LargeArc {
    fn default() -> Self {
        LargeArc(true)
    }
}

/// Direction in which an arc is swept
///
/// `Positive` sweeps toward increasing angles, which is clockwise on a
/// y-down surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sweep {
    #[default]
    Positive,
    Negative,
}

impl From<bool> for Sweep {
    fn from(positive: bool) -> Self {
        if positive {
            Sweep::Positive
        } else {
            Sweep::Negative
        }
    }
}

/// Center parameterization of a circular arc (angles in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl CircularArc {
    pub fn start_point(&self) -> Point {
        self.center + Vec2::from_angle(self.start_angle) * self.radius
    }

    pub fn end_point(&self) -> Point {
        self.center + Vec2::from_angle(self.end_angle) * self.radius
    }
}

/// Convert an endpoint arc to center form.
///
/// If the chord between `from` and `to` is longer than the diameter, the
/// radius is enlarged to half the chord (the smallest circle that reaches
/// both points). The center sits on the perpendicular bisector of the
/// chord; `sweep XOR large` selects the side rotated +90° from the chord
/// direction, otherwise the -90° side.
pub fn arc_endpoint_to_center(
    from: Point,
    to: Point,
    radius: f64,
    large: LargeArc,
    sweep: Sweep,
) -> CircularArc {
    let chord = to - from;
    let distance = chord.hypot();

    let mut radius = radius;
    if 2.0 * radius < distance {
        tracing::debug!(
            "Arc radius {} cannot reach endpoint, enlarging to {}",
            radius,
            distance / 2.0
        );
        radius = distance / 2.0;
    }

    let midpoint = from.midpoint(to);
    let direction = chord.atan2();
    let offset = (radius * radius - (distance / 2.0).powi(2)).max(0.0).sqrt();

    let normal = if (sweep == Sweep::Positive) ^ large.0 {
        // positive small arc or negative large arc
        direction + FRAC_PI_2
    } else {
        direction - FRAC_PI_2
    };
    let center = midpoint + Vec2::from_angle(normal) * offset;

    CircularArc {
        center,
        radius,
        start_angle: (from - center).atan2(),
        end_angle: (to - center).atan2(),
    }
}

/// Transform pair that maps an ellipse onto the unit circle.
///
/// Returns `(forward, inverse)`: `forward` rotates by `rotation` and then
/// scales by `rx:ry`, so a unit-radius arc drawn under it traces the
/// ellipse. `inverse` maps points into that unit-circle space. Returns
/// `None` when either radius is not positive; callers draw a straight
/// line instead.
pub fn ellipse_to_circle(rx: f64, ry: f64, rotation: Angle) -> Option<(Affine, Affine)> {
    if !(rx > 0.0 && ry > 0.0) {
        return None;
    }
    let angle = rotation.to_radians();
    let forward = Affine::rotate(angle) * Affine::scale_non_uniform(rx, ry);
    let inverse = Affine::scale_non_uniform(1.0 / rx, 1.0 / ry) * Affine::rotate(-angle);
    Some((forward, inverse))
}
