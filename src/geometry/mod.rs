// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Geometry kernel: closed-form arc and curve math.
//!
//! Everything here is a pure function of its inputs. The path builder
//! calls into this module to turn endpoint arcs into center arcs, quadratic
//! curves into cubics, and to infer the first control point of smooth
//! curves.

pub mod arc;
pub mod bezier;

pub use arc::{Angle, CircularArc, LargeArc, Sweep, arc_endpoint_to_center, ellipse_to_circle};
pub use bezier::{quadratic_to_cubic, reflect};

#[cfg(test)]
pub(crate) fn assert_point_near(actual: kurbo::Point, expected: kurbo::Point) {
    let diff = (actual - expected).hypot();
    assert!(
        diff < 1e-9,
        "expected {expected:?}, got {actual:?} (diff {diff})"
    );
}
