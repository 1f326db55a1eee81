// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Scoped coordinate transforms
//!
//! Opening a scope saves the engine state and pushes an identity frame.
//! Each transform issued inside the scope is applied to the engine and its
//! inverse is applied to the tracked points right away, so the tracker
//! always reads in the space that is active on the engine. The frame
//! accumulates those inverse maps. When the scope drops, the engine is
//! restored and the tracked points are mapped back by the frame's inverse.
//!
//! Scopes nest by borrowing: a [`TransformScope`] mutably borrows the
//! canvas, so an inner scope must end before the outer one can.
//!
//! A scope lasts as long as its binding. Drawing that should happen under
//! the transform goes through the bound scope:
//!
//! ```
//! use kurbo::Point;
//! use pathcraft::{Canvas, RecordingEngine};
//!
//! let mut canvas = Canvas::new(RecordingEngine::new(), 200.0, 200.0);
//! let mut scope = canvas.translate(100.0, 0.0);
//! scope.path().move_to((1.0, 1.0));
//! drop(scope);
//! assert_eq!(canvas.tracker().current(), Some(Point::new(101.0, 1.0)));
//! ```
//!
//! A scope that is opened and discarded in the same statement undoes its
//! transform straight away, so the compiler flags it:
//!
//! ```compile_fail
//! #![deny(unused_must_use)]
//! # use pathcraft::{Canvas, RecordingEngine};
//! let mut canvas = Canvas::new(RecordingEngine::new(), 200.0, 200.0);
//! canvas.translate(100.0, 0.0);
//! ```

use crate::canvas::Canvas;
use crate::engine::RenderEngine;
use crate::error::{CanvasError, Result};
use crate::geometry::Angle;
use crate::settings;
use kurbo::{Affine, Point};
use std::ops::{Deref, DerefMut};

/// Stack of accumulated point maps, one per open scope
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    frames: Vec<Affine>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a frame with nothing applied yet
    pub fn push(&mut self) {
        self.frames.push(Affine::IDENTITY);
    }

    /// Fold a point map into the innermost frame (applied after the maps
    /// already in it)
    pub fn compose(&mut self, map: Affine) {
        match self.frames.last_mut() {
            Some(frame) => *frame = map * *frame,
            None => tracing::warn!("transform composed with no open scope"),
        }
    }

    pub fn pop(&mut self) -> Option<Affine> {
        self.frames.pop()
    }

    /// The innermost frame
    pub fn top(&self) -> Option<Affine> {
        self.frames.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Inverse of `affine`, or an error if it has none
pub fn invert(affine: Affine) -> Result<Affine> {
    if affine.determinant().abs() < settings::arc::SINGULAR_EPSILON || !affine.is_finite() {
        return Err(CanvasError::SingularTransform(affine.as_coeffs()));
    }
    Ok(affine.inverse())
}

/// An open transform scope on a canvas.
///
/// Derefs to the canvas, so shapes, paths and paint can be issued inside
/// the scope. The transform methods defined here add to this scope; the
/// same methods called on the canvas open a new one.
#[must_use = "the transform is undone when the scope is dropped"]
pub struct TransformScope<'a, E: RenderEngine> {
    canvas: &'a mut Canvas<E>,
}

impl<'a, E: RenderEngine> TransformScope<'a, E> {
    pub(crate) fn open(canvas: &'a mut Canvas<E>) -> Self {
        canvas.engine.save();
        canvas.transforms.push();
        tracing::debug!("transform scope opened (depth {})", canvas.transforms.depth());
        Self { canvas }
    }

    pub fn translate(&mut self, tx: f64, ty: f64) -> &mut Self {
        self.canvas
            .apply_transform(Affine::translate((tx, ty)), Affine::translate((-tx, -ty)));
        self
    }

    /// Uniform scale
    pub fn scale(&mut self, s: f64) -> Result<&mut Self> {
        self.scale_non_uniform(s, s)
    }

    pub fn scale_non_uniform(&mut self, sx: f64, sy: f64) -> Result<&mut Self> {
        self.transform(Affine::scale_non_uniform(sx, sy))
    }

    /// Rotate about the origin
    pub fn rotate(&mut self, angle: Angle) -> &mut Self {
        self.rotate_about(angle, Point::ORIGIN)
    }

    pub fn rotate_about(&mut self, angle: Angle, center: impl Into<Point>) -> &mut Self {
        let center = center.into();
        let a = angle.to_radians();
        self.canvas
            .apply_transform(Affine::rotate_about(a, center), Affine::rotate_about(-a, center));
        self
    }

    /// Post-multiply the engine transform by `affine`
    pub fn transform(&mut self, affine: Affine) -> Result<&mut Self> {
        let inverse = invert(affine)?;
        self.canvas.apply_transform(affine, inverse);
        Ok(self)
    }

    /// Replace the engine transform with `affine`
    pub fn set_matrix(&mut self, affine: Affine) -> Result<&mut Self> {
        let inverse = invert(affine)?;
        self.canvas.replace_matrix(affine, inverse);
        Ok(self)
    }

    /// Clip to the current path; the clip ends with this scope
    pub fn clip(&mut self, keep: bool) -> &mut Self {
        self.canvas.engine.clip(keep);
        self
    }

    /// End the scope now
    pub fn close(self) {}
}

impl<E: RenderEngine> Deref for TransformScope<'_, E> {
    type Target = Canvas<E>;

    fn deref(&self) -> &Self::Target {
        self.canvas
    }
}

impl<E: RenderEngine> DerefMut for TransformScope<'_, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.canvas
    }
}

impl<E: RenderEngine> Drop for TransformScope<'_, E> {
    fn drop(&mut self) {
        let canvas = &mut *self.canvas;
        canvas.engine.restore();
        let Some(frame) = canvas.transforms.pop() else {
            tracing::warn!("transform scope closed with no frame");
            return;
        };
        canvas.tracker.map_points(&frame.inverse());
        tracing::debug!("transform scope closed (depth {})", canvas.transforms.depth());
    }
}

// ============================================================================
// CANVAS ENTRY POINTS
// ============================================================================

impl<E: RenderEngine> Canvas<E> {
    /// Open an empty transform scope
    #[must_use = "the transform is undone when the scope is dropped"]
    pub fn open_scope(&mut self) -> TransformScope<'_, E> {
        TransformScope::open(self)
    }

    #[must_use = "the transform is undone when the scope is dropped"]
    pub fn translate(&mut self, tx: f64, ty: f64) -> TransformScope<'_, E> {
        let mut scope = self.open_scope();
        scope.translate(tx, ty);
        scope
    }

    /// Uniform scale
    pub fn scale(&mut self, s: f64) -> Result<TransformScope<'_, E>> {
        self.scale_non_uniform(s, s)
    }

    pub fn scale_non_uniform(&mut self, sx: f64, sy: f64) -> Result<TransformScope<'_, E>> {
        self.transform(Affine::scale_non_uniform(sx, sy))
    }

    #[must_use = "the transform is undone when the scope is dropped"]
    pub fn rotate(&mut self, angle: Angle) -> TransformScope<'_, E> {
        self.rotate_about(angle, Point::ORIGIN)
    }

    #[must_use = "the transform is undone when the scope is dropped"]
    pub fn rotate_about(
        &mut self,
        angle: Angle,
        center: impl Into<Point>,
    ) -> TransformScope<'_, E> {
        let mut scope = self.open_scope();
        scope.rotate_about(angle, center);
        scope
    }

    /// Open a scope that post-multiplies the engine transform by `affine`.
    ///
    /// A singular `affine` is rejected before the scope opens.
    pub fn transform(&mut self, affine: Affine) -> Result<TransformScope<'_, E>> {
        let inverse = invert(affine)?;
        let mut scope = self.open_scope();
        scope.apply_transform(affine, inverse);
        Ok(scope)
    }

    /// Open a scope that replaces the engine transform with `affine`
    pub fn set_matrix(&mut self, affine: Affine) -> Result<TransformScope<'_, E>> {
        let inverse = invert(affine)?;
        let mut scope = self.open_scope();
        scope.replace_matrix(affine, inverse);
        Ok(scope)
    }

    /// Open a scope clipped to the current path
    #[must_use = "the clip is undone when the scope is dropped"]
    pub fn clip(&mut self, keep: bool) -> TransformScope<'_, E> {
        let mut scope = self.open_scope();
        scope.clip(keep);
        scope
    }

    /// Apply `forward` to the engine and its `inverse` to the tracked points
    pub(crate) fn apply_transform(&mut self, forward: Affine, inverse: Affine) {
        self.engine.transform(forward);
        self.transforms.compose(inverse);
        self.tracker.map_points(&inverse);
    }

    /// Replace the engine transform. Tracked points move from the old user
    /// space to the new one through device space.
    pub(crate) fn replace_matrix(&mut self, affine: Affine, inverse: Affine) {
        let map = inverse * self.engine.matrix();
        self.engine.set_matrix(affine);
        self.transforms.compose(map);
        self.tracker.map_points(&map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineCall, RecordingEngine};
    use crate::geometry::assert_point_near;
    use kurbo::PathEl;

    fn canvas() -> Canvas<RecordingEngine> {
        Canvas::new(RecordingEngine::new(), 600.0, 400.0)
    }

    #[test]
    fn test_stack_composes_in_order() {
        let mut stack = TransformStack::new();
        stack.push();
        stack.compose(Affine::translate((-10.0, 0.0)));
        stack.compose(Affine::scale(0.5));

        let frame = stack.top().unwrap();
        assert_point_near(frame * Point::new(30.0, 4.0), Point::new(10.0, 2.0));
        assert_eq!(stack.depth(), 1);
        stack.pop();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_translate_maps_tracked_points() {
        let mut canvas = canvas();
        canvas.path().move_to((50.0, 50.0));
        {
            let scope = canvas.translate(10.0, 20.0);
            assert_eq!(scope.tracker().current(), Some(Point::new(40.0, 30.0)));
        }
        assert_eq!(canvas.tracker().current(), Some(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_scope_round_trip_restores_points() {
        let mut canvas = canvas();
        canvas.path().move_to((7.0, -3.0)).cubic_to((1.0, 1.0), (2.0, 8.0), (12.0, 4.0));
        let before = canvas.tracker().clone();

        {
            let mut scope = canvas.rotate_about(Angle::degrees(30.0), (100.0, 50.0));
            scope.scale_non_uniform(2.0, 0.25).unwrap().translate(-5.0, 9.0);
            scope.transform(Affine::new([1.0, 0.5, 0.0, 1.0, 3.0, 3.0])).unwrap();
        }

        let after = canvas.tracker();
        assert_point_near(after.current().unwrap(), before.current().unwrap());
        assert_point_near(after.start().unwrap(), before.start().unwrap());
        assert_point_near(
            after.last_control().unwrap().point,
            before.last_control().unwrap().point,
        );
    }

    #[test]
    fn test_points_drawn_inside_scope_map_out() {
        let mut canvas = canvas();
        {
            let mut scope = canvas.translate(100.0, 0.0);
            scope.scale(2.0).unwrap();
            scope.path().move_to((5.0, 5.0));
        }
        assert_point_near(canvas.tracker().current().unwrap(), Point::new(110.0, 10.0));
    }

    #[test]
    fn test_bound_scope_transforms_engine_path() {
        let mut canvas = canvas();
        let mut scope = canvas.translate(100.0, 0.0);
        scope.path().move_to((1.0, 1.0));
        assert_eq!(
            scope.engine().path().elements(),
            &[PathEl::MoveTo(Point::new(101.0, 1.0))]
        );
        assert_eq!(scope.tracker().current(), Some(Point::new(1.0, 1.0)));
        drop(scope);
        assert_eq!(canvas.tracker().current(), Some(Point::new(101.0, 1.0)));
        assert_eq!(canvas.engine().save_depth(), 0);
    }

    #[test]
    fn test_relative_command_inside_scope_uses_scope_space() {
        let mut canvas = canvas();
        canvas.path().move_to((100.0, 100.0));
        {
            let mut scope = canvas.scale(2.0).unwrap();
            scope.path().rel_line_to((10.0, 0.0));
        }
        // 10 units in a 2x space is 20 units outside
        assert_point_near(canvas.tracker().current().unwrap(), Point::new(120.0, 100.0));
    }

    #[test]
    fn test_nested_scopes_pair_save_restore() {
        let mut canvas = canvas();
        {
            let mut outer = canvas.translate(1.0, 2.0);
            {
                let mut inner = outer.open_scope();
                inner.rotate(Angle::degrees(90.0));
                assert_eq!(inner.transforms.depth(), 2);
            }
            assert_eq!(outer.engine().save_depth(), 1);
        }
        assert_eq!(canvas.engine().save_depth(), 0);
        assert!(canvas.transforms.is_empty());
        assert_eq!(canvas.engine().matrix(), Affine::IDENTITY);
    }

    #[test]
    fn test_singular_transform_is_rejected_before_engine_call() {
        let mut canvas = canvas();
        canvas.engine_mut().clear_calls();

        let err = canvas.scale_non_uniform(0.0, 1.0).err();
        assert!(matches!(err, Some(CanvasError::SingularTransform(_))));
        assert!(canvas.engine().calls().is_empty());
        assert!(canvas.transforms.is_empty());
    }

    #[test]
    fn test_scope_restores_on_error_path() {
        fn draw(canvas: &mut Canvas<RecordingEngine>) -> Result<()> {
            let mut scope = canvas.translate(5.0, 5.0);
            scope.scale(0.0)?;
            Ok(())
        }

        let mut canvas = canvas();
        assert!(draw(&mut canvas).is_err());
        assert_eq!(canvas.engine().save_depth(), 0);
        assert!(canvas.transforms.is_empty());
    }

    #[test]
    fn test_set_matrix_keeps_points_in_place_on_device() {
        let mut canvas = canvas();
        canvas.path().move_to((10.0, 10.0));
        {
            let scope = canvas.set_matrix(Affine::scale(2.0)).unwrap();
            // device point (10, 10) is (5, 5) under a 2x matrix
            assert_point_near(scope.tracker().current().unwrap(), Point::new(5.0, 5.0));
        }
        assert_point_near(canvas.tracker().current().unwrap(), Point::new(10.0, 10.0));
        assert_eq!(canvas.engine().matrix(), Affine::IDENTITY);
    }

    #[test]
    fn test_clip_scope_issues_clip_and_restore() {
        let mut canvas = canvas();
        canvas.rect(10.0, 10.0, (0.0, 0.0), false);
        canvas.engine_mut().clear_calls();
        canvas.clip(false).close();

        assert_eq!(
            canvas.engine().calls(),
            &[
                EngineCall::Save,
                EngineCall::Clip { preserve: false },
                EngineCall::Restore
            ]
        );
    }
}
