// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Recording engine backed by `kurbo::BezPath`
//!
//! Builds the current path in device space, keeps a save/restore stack of
//! graphics states, and records every fill, stroke and paint into a
//! display list. Every primitive call is also logged so callers (and
//! tests) can inspect exactly what a command issued.

use super::RenderEngine;
use crate::paint::{FillRule, Paint, StrokeStyle};
use crate::settings;
use kurbo::{Affine, BezPath, PathEl, Point, Rect, Vec2};
use std::f64::consts::TAU;

/// One primitive call, with coordinates as the caller passed them
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    MoveTo(Point),
    LineTo(Point),
    CurveTo(Point, Point, Point),
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
        negative: bool,
    },
    Rectangle(Rect),
    NewSubPath,
    ClosePath,
    NewPath,
    Save,
    Restore,
    Transform(Affine),
    SetMatrix(Affine),
    IdentityMatrix,
    Clip { preserve: bool },
    ResetClip,
    Fill { preserve: bool },
    Stroke { preserve: bool },
    Paint { alpha: f64 },
    PaintSurface,
}

/// A painted item in the display list
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill {
        path: BezPath,
        paint: Paint,
        rule: FillRule,
        /// CTM the paint's own coordinates are interpreted under
        paint_transform: Affine,
    },
    Stroke {
        path: BezPath,
        paint: Paint,
        style: StrokeStyle,
        paint_transform: Affine,
    },
    Paint {
        paint: Paint,
        alpha: f64,
        clip: Vec<BezPath>,
        paint_transform: Affine,
    },
}

#[derive(Debug, Clone, Default)]
struct GraphicsState {
    ctm: Affine,
    clip: Vec<BezPath>,
}

/// Reference engine that records into kurbo paths
#[derive(Debug, Default)]
pub struct RecordingEngine {
    path: BezPath,
    /// Device-space current point
    current: Option<Point>,
    subpath_start: Option<Point>,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    ops: Vec<DrawOp>,
    calls: Vec<EngineCall>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current path in device space
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Display list of everything painted so far
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Log of every primitive call
    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of unmatched `save` calls
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Current point in user space, as the engine sees it
    pub fn current_point(&self) -> Option<Point> {
        let inverse = self.state.ctm.inverse();
        self.current.map(|p| inverse * p)
    }

    fn record(&mut self, call: EngineCall) {
        tracing::trace!("engine: {:?}", call);
        self.calls.push(call);
    }

    fn device_move_to(&mut self, p: Point) {
        self.path.move_to(p);
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    fn device_line_to(&mut self, p: Point) {
        if self.current.is_none() {
            self.device_move_to(p);
            return;
        }
        self.path.line_to(p);
        self.current = Some(p);
    }

    fn append_arc(&mut self, center: Point, radius: f64, start: f64, end: f64, negative: bool) {
        let mut sweep = end - start;
        if !negative && sweep < 0.0 {
            sweep = sweep.rem_euclid(TAU);
        } else if negative && sweep > 0.0 {
            sweep = -((-sweep).rem_euclid(TAU));
        }

        let ctm = self.state.ctm;
        let arc_start = center + Vec2::from_angle(start) * radius;
        self.device_line_to(ctm * arc_start);

        let arc = kurbo::Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle: start,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        for el in arc.append_iter(settings::arc::TOLERANCE) {
            self.path.push(ctm * el);
        }
        let arc_end = center + Vec2::from_angle(start + sweep) * radius;
        self.current = Some(ctm * arc_end);
    }

    fn take_path(&mut self, preserve: bool) -> BezPath {
        if preserve {
            self.path.clone()
        } else {
            self.current = None;
            self.subpath_start = None;
            std::mem::take(&mut self.path)
        }
    }
}

impl RenderEngine for RecordingEngine {
    type Surface = Vec<DrawOp>;

    fn move_to(&mut self, p: Point) {
        self.record(EngineCall::MoveTo(p));
        let device = self.state.ctm * p;
        self.device_move_to(device);
    }

    fn line_to(&mut self, p: Point) {
        self.record(EngineCall::LineTo(p));
        let device = self.state.ctm * p;
        self.device_line_to(device);
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.record(EngineCall::CurveTo(c1, c2, p));
        let ctm = self.state.ctm;
        if self.current.is_none() {
            self.device_move_to(ctm * c1);
        }
        self.path.curve_to(ctm * c1, ctm * c2, ctm * p);
        self.current = Some(ctm * p);
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        self.record(EngineCall::Arc {
            center,
            radius,
            start,
            end,
            negative: false,
        });
        self.append_arc(center, radius, start, end, false);
    }

    fn arc_negative(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        self.record(EngineCall::Arc {
            center,
            radius,
            start,
            end,
            negative: true,
        });
        self.append_arc(center, radius, start, end, true);
    }

    fn rectangle(&mut self, rect: Rect) {
        self.record(EngineCall::Rectangle(rect));
        let ctm = self.state.ctm;
        self.device_move_to(ctm * Point::new(rect.x0, rect.y0));
        self.path.line_to(ctm * Point::new(rect.x1, rect.y0));
        self.path.line_to(ctm * Point::new(rect.x1, rect.y1));
        self.path.line_to(ctm * Point::new(rect.x0, rect.y1));
        self.path.close_path();
        self.current = self.subpath_start;
    }

    fn new_sub_path(&mut self) {
        self.record(EngineCall::NewSubPath);
        self.current = None;
    }

    fn close_path(&mut self) {
        self.record(EngineCall::ClosePath);
        if self.current.is_some() {
            self.path.push(PathEl::ClosePath);
            self.current = self.subpath_start;
        }
    }

    fn new_path(&mut self) {
        self.record(EngineCall::NewPath);
        self.take_path(false);
    }

    fn save(&mut self) {
        self.record(EngineCall::Save);
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        self.record(EngineCall::Restore);
        match self.saved.pop() {
            Some(state) => self.state = state,
            None => tracing::warn!("restore without matching save"),
        }
    }

    fn transform(&mut self, affine: Affine) {
        self.record(EngineCall::Transform(affine));
        self.state.ctm *= affine;
    }

    fn set_matrix(&mut self, affine: Affine) {
        self.record(EngineCall::SetMatrix(affine));
        self.state.ctm = affine;
    }

    fn matrix(&self) -> Affine {
        self.state.ctm
    }

    fn identity_matrix(&mut self) {
        self.record(EngineCall::IdentityMatrix);
        self.state.ctm = Affine::IDENTITY;
    }

    fn clip(&mut self, preserve: bool) {
        self.record(EngineCall::Clip { preserve });
        let path = self.take_path(preserve);
        self.state.clip.push(path);
    }

    fn reset_clip(&mut self) {
        self.record(EngineCall::ResetClip);
        self.state.clip.clear();
    }

    fn fill(&mut self, paint: &Paint, rule: FillRule, preserve: bool) {
        self.record(EngineCall::Fill { preserve });
        let path = self.take_path(preserve);
        self.ops.push(DrawOp::Fill {
            path,
            paint: paint.clone(),
            rule,
            paint_transform: self.state.ctm,
        });
    }

    fn stroke(&mut self, paint: &Paint, style: &StrokeStyle, preserve: bool) {
        self.record(EngineCall::Stroke { preserve });
        let path = self.take_path(preserve);
        self.ops.push(DrawOp::Stroke {
            path,
            paint: paint.clone(),
            style: style.clone(),
            paint_transform: self.state.ctm,
        });
    }

    fn paint(&mut self, paint: &Paint, alpha: f64) {
        self.record(EngineCall::Paint { alpha });
        self.ops.push(DrawOp::Paint {
            paint: paint.clone(),
            alpha,
            clip: self.state.clip.clone(),
            paint_transform: self.state.ctm,
        });
    }

    fn target(&self) -> Self::Surface {
        self.ops.clone()
    }

    fn paint_surface(&mut self, surface: &Self::Surface) {
        self.record(EngineCall::PaintSurface);
        self.ops.extend(surface.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    #[test]
    fn test_transform_applies_to_points() {
        let mut engine = RecordingEngine::new();
        engine.translate(10.0, 20.0);
        engine.move_to(Point::new(1.0, 1.0));

        assert_eq!(engine.path().elements()[0], PathEl::MoveTo(Point::new(11.0, 21.0)));
        assert_eq!(engine.current_point(), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_save_restore_ctm() {
        let mut engine = RecordingEngine::new();
        engine.save();
        engine.scale(2.0, 3.0);
        assert_eq!(engine.matrix(), Affine::scale_non_uniform(2.0, 3.0));
        engine.restore();

        assert_eq!(engine.matrix(), Affine::IDENTITY);
        assert_eq!(engine.save_depth(), 0);
    }

    #[test]
    fn test_arc_ends_at_end_angle() {
        let mut engine = RecordingEngine::new();
        engine.arc(Point::new(0.0, 0.0), 10.0, 0.0, std::f64::consts::FRAC_PI_2);

        let end = engine.current_point().unwrap();
        assert!((end - Point::new(0.0, 10.0)).hypot() < 1e-9);
        // no current point before the arc: it starts with a move
        assert!(matches!(engine.path().elements()[0], PathEl::MoveTo(_)));
    }

    #[test]
    fn test_negative_arc_sweeps_backwards() {
        let mut engine = RecordingEngine::new();
        engine.move_to(Point::new(10.0, 0.0));
        engine.arc_negative(Point::new(0.0, 0.0), 10.0, 0.0, std::f64::consts::FRAC_PI_2);

        let end = engine.current_point().unwrap();
        assert!((end - Point::new(0.0, 10.0)).hypot() < 1e-9);
        // three quarters of a circle needs more than one cubic
        let curves = engine
            .path()
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::CurveTo(..)))
            .count();
        assert!(curves >= 3);
    }

    #[test]
    fn test_fill_consumes_path_unless_preserved() {
        let mut engine = RecordingEngine::new();
        engine.rectangle(Rect::new(0.0, 0.0, 10.0, 10.0));
        engine.fill(&Color::BLACK.into(), FillRule::NonZero, true);
        assert!(!engine.path().is_empty());

        engine.stroke(&Color::WHITE.into(), &StrokeStyle::default(), false);
        assert!(engine.path().is_empty());
        assert_eq!(engine.ops().len(), 2);
        assert_eq!(engine.current_point(), None);
    }

    #[test]
    fn test_close_returns_to_subpath_start() {
        let mut engine = RecordingEngine::new();
        engine.move_to(Point::new(5.0, 5.0));
        engine.line_to(Point::new(10.0, 5.0));
        engine.close_path();
        assert_eq!(engine.current_point(), Some(Point::new(5.0, 5.0)));
    }
}
