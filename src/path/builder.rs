// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Fluent path commands
//!
//! A [`PathBuilder`] borrows the canvas and issues engine primitives for
//! each command, then merges the command's result into the canvas's
//! [`PointTracker`](super::PointTracker). Commands take the builder by
//! value and hand it back, so a chain can end in a paint call or in a
//! clip scope.
//!
//! Relative commands resolve against the tracked current point and only
//! ever send absolute coordinates to the engine.

use super::point::{ControlPoint, CurveKind, PartialPoint};
use crate::canvas::{Canvas, FillOptions, StrokeOptions};
use crate::engine::RenderEngine;
use crate::error::Result;
use crate::geometry::{self, Angle, LargeArc, Sweep};
use crate::paint::Paint;
use crate::svg_path;
use crate::transform::TransformScope;
use kurbo::{Point, Vec2};

/// Command surface for building a path on a canvas
pub struct PathBuilder<'a, E: RenderEngine> {
    canvas: &'a mut Canvas<E>,
}

impl<'a, E: RenderEngine> PathBuilder<'a, E> {
    pub(crate) fn new(canvas: &'a mut Canvas<E>) -> Self {
        Self { canvas }
    }

    /// The point relative commands resolve against
    fn current(&self) -> Point {
        self.canvas.tracker.current_or_origin()
    }

    /// Drawing commands continue from the origin when nothing was drawn yet
    fn ensure_current(&mut self) {
        if self.canvas.tracker.current().is_none() {
            tracing::debug!("drawing command with no current point, starting at origin");
            self.canvas.engine.move_to(Point::ORIGIN);
            self.canvas
                .tracker
                .update(None, Some(Point::ORIGIN.into()), None, false);
        }
    }

    // ========================================================================
    // MOVES AND LINES
    // ========================================================================

    pub fn move_to(self, p: impl Into<Point>) -> Self {
        let p = p.into();
        self.canvas.engine.move_to(p);
        self.canvas.tracker.update(None, Some(p.into()), None, false);
        self
    }

    pub fn rel_move_to(self, delta: impl Into<Vec2>) -> Self {
        let delta = delta.into();
        let target = self.current() + delta;
        self.canvas.engine.move_to(target);
        self.canvas
            .tracker
            .update(None, Some(delta.to_point().into()), None, true);
        self
    }

    pub fn line_to(mut self, p: impl Into<Point>) -> Self {
        let p = p.into();
        self.ensure_current();
        self.canvas.engine.line_to(p);
        self.canvas.tracker.update(Some(p.into()), None, None, false);
        self
    }

    pub fn rel_line_to(mut self, delta: impl Into<Vec2>) -> Self {
        let delta = delta.into();
        self.ensure_current();
        let target = self.current() + delta;
        self.canvas.engine.line_to(target);
        self.canvas
            .tracker
            .update(Some(delta.to_point().into()), None, None, true);
        self
    }

    /// Horizontal line to an absolute x
    pub fn horizontal_to(mut self, x: f64) -> Self {
        self.ensure_current();
        let target = Point::new(x, self.current().y);
        self.canvas.engine.line_to(target);
        self.canvas
            .tracker
            .update(Some(PartialPoint::x(x)), None, None, false);
        self
    }

    pub fn rel_horizontal(mut self, dx: f64) -> Self {
        self.ensure_current();
        let target = self.current() + Vec2::new(dx, 0.0);
        self.canvas.engine.line_to(target);
        self.canvas
            .tracker
            .update(Some(PartialPoint::x(dx)), None, None, true);
        self
    }

    /// Vertical line to an absolute y
    pub fn vertical_to(mut self, y: f64) -> Self {
        self.ensure_current();
        let target = Point::new(self.current().x, y);
        self.canvas.engine.line_to(target);
        self.canvas
            .tracker
            .update(Some(PartialPoint::y(y)), None, None, false);
        self
    }

    pub fn rel_vertical(mut self, dy: f64) -> Self {
        self.ensure_current();
        let target = self.current() + Vec2::new(0.0, dy);
        self.canvas.engine.line_to(target);
        self.canvas
            .tracker
            .update(Some(PartialPoint::y(dy)), None, None, true);
        self
    }

    // ========================================================================
    // CURVES
    // ========================================================================

    pub fn cubic_to(
        mut self,
        c1: impl Into<Point>,
        c2: impl Into<Point>,
        p: impl Into<Point>,
    ) -> Self {
        let (c2, p) = (c2.into(), p.into());
        self.ensure_current();
        self.canvas.engine.curve_to(c1.into(), c2, p);
        self.canvas
            .tracker
            .update(Some(p.into()), None, Some(ControlPoint::cubic(c2)), false);
        self
    }

    pub fn rel_cubic_to(
        mut self,
        d1: impl Into<Vec2>,
        d2: impl Into<Vec2>,
        d: impl Into<Vec2>,
    ) -> Self {
        let (d1, d2, d) = (d1.into(), d2.into(), d.into());
        self.ensure_current();
        let origin = self.current();
        self.canvas
            .engine
            .curve_to(origin + d1, origin + d2, origin + d);
        self.canvas.tracker.update(
            Some(d.to_point().into()),
            None,
            Some(ControlPoint::cubic(d2.to_point())),
            true,
        );
        self
    }

    /// Cubic whose first control point mirrors the previous cubic's second
    pub fn smooth_cubic_to(mut self, c2: impl Into<Point>, p: impl Into<Point>) -> Self {
        self.ensure_current();
        let c1 = self.canvas.tracker.smooth_control(CurveKind::Cubic);
        self.cubic_to(c1, c2, p)
    }

    pub fn rel_smooth_cubic_to(mut self, d2: impl Into<Vec2>, d: impl Into<Vec2>) -> Self {
        self.ensure_current();
        let origin = self.current();
        let c1 = self.canvas.tracker.smooth_control(CurveKind::Cubic);
        self.cubic_to(c1, origin + d2.into(), origin + d.into())
    }

    /// Quadratic curve, drawn as the equivalent cubic
    pub fn quad_to(mut self, c: impl Into<Point>, p: impl Into<Point>) -> Self {
        let (c, p) = (c.into(), p.into());
        self.ensure_current();
        let (c1, c2) = geometry::quadratic_to_cubic(self.current(), c, p);
        self.canvas.engine.curve_to(c1, c2, p);
        self.canvas
            .tracker
            .update(Some(p.into()), None, Some(ControlPoint::quadratic(c)), false);
        self
    }

    pub fn rel_quad_to(mut self, dc: impl Into<Vec2>, d: impl Into<Vec2>) -> Self {
        self.ensure_current();
        let origin = self.current();
        self.quad_to(origin + dc.into(), origin + d.into())
    }

    /// Quadratic whose control point mirrors the previous quadratic's
    pub fn smooth_quad_to(mut self, p: impl Into<Point>) -> Self {
        self.ensure_current();
        let c = self.canvas.tracker.smooth_control(CurveKind::Quadratic);
        self.quad_to(c, p)
    }

    pub fn rel_smooth_quad_to(mut self, d: impl Into<Vec2>) -> Self {
        self.ensure_current();
        let p = self.current() + d.into();
        self.smooth_quad_to(p)
    }

    // ========================================================================
    // ARCS
    // ========================================================================

    /// Circular arc in center form.
    ///
    /// `Sweep::Positive` draws toward increasing angles. The current point
    /// becomes the arc's end as computed from the center and radius.
    pub fn arc_center(
        self,
        center: impl Into<Point>,
        radius: f64,
        start: Angle,
        end: Angle,
        sweep: Sweep,
    ) -> Self {
        let center = center.into();
        let (a1, a2) = (start.to_radians(), end.to_radians());
        match sweep {
            Sweep::Positive => self.canvas.engine.arc(center, radius, a1, a2),
            Sweep::Negative => self.canvas.engine.arc_negative(center, radius, a1, a2),
        }
        let end_point = center + Vec2::from_angle(a2) * radius;
        self.canvas
            .tracker
            .update(Some(end_point.into()), None, None, false);
        self
    }

    /// Circular arc from the current point to `to`.
    ///
    /// A radius that is not positive draws a straight line. A radius too
    /// small to reach `to` is enlarged. The current point ends exactly on
    /// `to`.
    pub fn arc_to(
        mut self,
        radius: f64,
        to: impl Into<Point>,
        large: LargeArc,
        sweep: Sweep,
    ) -> Self {
        let to = to.into();
        if radius <= 0.0 {
            tracing::debug!("arc radius {} is not positive, drawing a line", radius);
            return self.line_to(to);
        }
        self.ensure_current();
        let arc = geometry::arc_endpoint_to_center(self.current(), to, radius, large, sweep);
        let builder = self.arc_center(
            arc.center,
            arc.radius,
            Angle::radians(arc.start_angle),
            Angle::radians(arc.end_angle),
            sweep,
        );
        builder.canvas.tracker.update(Some(to.into()), None, None, false);
        builder
    }

    pub fn rel_arc_to(
        mut self,
        radius: f64,
        delta: impl Into<Vec2>,
        large: LargeArc,
        sweep: Sweep,
    ) -> Self {
        self.ensure_current();
        let to = self.current() + delta.into();
        self.arc_to(radius, to, large, sweep)
    }

    /// Elliptical arc from the current point to `to`.
    ///
    /// The arc is drawn as a unit circular arc inside a scope that rotates
    /// by `rotation` and scales by the radii. Radii that are not positive
    /// draw a straight line.
    pub fn ellipse_arc_to(
        mut self,
        radii: impl Into<Vec2>,
        to: impl Into<Point>,
        large: LargeArc,
        sweep: Sweep,
        rotation: Angle,
    ) -> Self {
        let (radii, to) = (radii.into(), to.into());
        let Some((forward, inverse)) = geometry::ellipse_to_circle(radii.x, radii.y, rotation)
        else {
            tracing::debug!("ellipse radii {:?} are not positive, drawing a line", radii);
            return self.line_to(to);
        };
        self.ensure_current();
        {
            let mut scope = self.canvas.open_scope();
            scope.apply_transform(forward, inverse);
            let target = scope.transforms.top().map_or(to, |frame| frame * to);
            scope.path().arc_to(1.0, target, large, sweep);
        }
        self.canvas.tracker.update(Some(to.into()), None, None, false);
        self
    }

    pub fn rel_ellipse_arc_to(
        mut self,
        radii: impl Into<Vec2>,
        delta: impl Into<Vec2>,
        large: LargeArc,
        sweep: Sweep,
        rotation: Angle,
    ) -> Self {
        self.ensure_current();
        let to = self.current() + delta.into();
        self.ellipse_arc_to(radii, to, large, sweep, rotation)
    }

    /// Close the subpath back to its start
    pub fn close(self) -> Self {
        self.canvas.engine.close_path();
        self.canvas.tracker.close();
        self
    }

    // ========================================================================
    // PASS-THROUGH
    // ========================================================================

    /// Replay path data onto this builder, resolving units against the canvas
    pub fn d(self, data: &str) -> Result<Self> {
        let context = self.canvas.parse_context();
        svg_path::replay(self, data, &context)
    }

    pub fn fill(self, paint: impl Into<Paint>, options: &FillOptions) -> Self {
        self.canvas.fill(paint, options);
        self
    }

    pub fn stroke(self, paint: impl Into<Paint>, options: &StrokeOptions) -> Self {
        self.canvas.stroke(paint, options);
        self
    }

    /// Clip to the path built so far; the clip ends with the returned scope
    pub fn clip(self, keep: bool) -> TransformScope<'a, E> {
        let canvas = self.canvas;
        canvas.clip(keep)
    }

    /// The canvas this builder draws on
    pub fn canvas(&mut self) -> &mut Canvas<E> {
        self.canvas
    }
}
