// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Tracked path state: current point, subpath start and last control point
//!
//! One tracker belongs to a drawing session and outlives individual path
//! builders, so consecutive paths continue from the same current point.
//! Every command funnels through [`PointTracker::update`]; the transform
//! stack remaps the tracked points with [`PointTracker::map_points`] so they
//! always read in the coordinate space that is active on the engine.

use super::point::{ControlPoint, CurveKind, PartialPoint};
use crate::geometry;
use kurbo::{Affine, Point};

/// Tracked state of a drawing session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointTracker {
    current: Option<Point>,
    start: Option<Point>,
    last_control: Option<ControlPoint>,
}

impl PointTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The point the next command continues from, if any command ran yet
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    /// The point a close-path command returns to
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn last_control(&self) -> Option<ControlPoint> {
        self.last_control
    }

    /// Current point, with a missing current point read as the origin
    pub fn current_or_origin(&self) -> Point {
        self.current.unwrap_or(Point::ORIGIN)
    }

    /// Merge one command's result into the tracked state.
    ///
    /// With `relative`, every supplied value is first offset by the current
    /// point (or the origin before the first command); unspecified axes are
    /// not offset. The new current point is the supplied `current`, else the
    /// supplied `start`, else unchanged, with unspecified axes filled from
    /// the previous current point. `start` only changes when supplied.
    /// `last_control` is always replaced, so any non-curve command clears
    /// the smoothing context.
    pub fn update(
        &mut self,
        current: Option<PartialPoint>,
        start: Option<PartialPoint>,
        last_control: Option<ControlPoint>,
        relative: bool,
    ) {
        let (current, start, last_control) = if relative {
            let offset = self.current_or_origin().to_vec2();
            (
                current.map(|p| p.offset(offset)),
                start.map(|p| p.offset(offset)),
                last_control.map(|c| c.offset(offset)),
            )
        } else {
            (current, start, last_control)
        };

        let previous = self.current;
        if let Some(target) = current.or(start) {
            self.current = Some(target.merge(previous));
        }
        if let Some(start) = start {
            self.start = Some(start.merge(previous));
        }
        self.last_control = last_control;
    }

    /// Return to the subpath start and clear the smoothing context
    pub fn close(&mut self) {
        let start = self.start.map(PartialPoint::from);
        self.update(start, None, None, false);
    }

    /// First control point for a smooth curve of the given kind.
    ///
    /// This is the reflection of the last control point about the current
    /// point when the previous command drew the same kind of curve, and
    /// the current point itself otherwise.
    pub fn smooth_control(&self, kind: CurveKind) -> Point {
        let current = self.current_or_origin();
        match self.last_control {
            Some(control) if control.kind == kind => geometry::reflect(current, control.point),
            _ => current,
        }
    }

    /// Apply `affine` to every tracked point
    pub fn map_points(&mut self, affine: &Affine) {
        self.current = self.current.map(|p| *affine * p);
        self.start = self.start.map(|p| *affine * p);
        self.last_control = self.last_control.map(|c| c.transformed(affine));
    }
}
