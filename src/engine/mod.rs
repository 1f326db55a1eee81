// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Rendering engine interface
//!
//! The engine owns the current path and the current transformation
//! matrix (CTM). Canvas code never reads the path back; it only issues
//! primitives and mirrors the points it needs in its own tracker.
//!
//! Coordinates passed to path primitives are user-space coordinates,
//! interpreted through the engine's CTM at the time of the call.

pub mod recording;

pub use recording::{DrawOp, EngineCall, RecordingEngine};

use crate::paint::{FillRule, Paint, StrokeStyle};
use kurbo::{Affine, Point, Rect};

/// Primitive operations a 2D rendering engine provides
pub trait RenderEngine {
    /// A snapshot of what the engine has drawn, usable as a paint source
    type Surface: Clone;

    // ========================================================================
    // PATH CONSTRUCTION
    // ========================================================================

    fn move_to(&mut self, p: Point);

    fn line_to(&mut self, p: Point);

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point);

    /// Arc of increasing angle from `start` to `end` (radians).
    ///
    /// `end` is advanced by whole turns until it is not below `start`. A
    /// line joins the current point to the arc start if there is a current
    /// point.
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64);

    /// Arc of decreasing angle from `start` to `end` (radians)
    fn arc_negative(&mut self, center: Point, radius: f64, start: f64, end: f64);

    /// Closed rectangle subpath; leaves the current point at the origin corner
    fn rectangle(&mut self, rect: Rect);

    /// Begin a new subpath without a current point
    fn new_sub_path(&mut self);

    fn close_path(&mut self);

    /// Discard the current path
    fn new_path(&mut self);

    // ========================================================================
    // TRANSFORM STATE
    // ========================================================================

    /// Push the graphics state (CTM and clip)
    fn save(&mut self);

    /// Pop the graphics state pushed by the matching `save`
    fn restore(&mut self);

    /// Post-multiply the CTM: `ctm = ctm * affine`
    fn transform(&mut self, affine: Affine);

    fn translate(&mut self, tx: f64, ty: f64) {
        self.transform(Affine::translate((tx, ty)));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform(Affine::scale_non_uniform(sx, sy));
    }

    fn rotate(&mut self, angle: f64) {
        self.transform(Affine::rotate(angle));
    }

    /// Replace the CTM
    fn set_matrix(&mut self, affine: Affine);

    fn matrix(&self) -> Affine;

    /// Reset the CTM to the device identity
    fn identity_matrix(&mut self);

    // ========================================================================
    // CLIPPING AND PAINTING
    // ========================================================================

    /// Intersect the clip with the current path
    fn clip(&mut self, preserve: bool);

    fn reset_clip(&mut self);

    fn fill(&mut self, paint: &Paint, rule: FillRule, preserve: bool);

    fn stroke(&mut self, paint: &Paint, style: &StrokeStyle, preserve: bool);

    /// Paint the whole clip region with `paint` at `alpha`
    fn paint(&mut self, paint: &Paint, alpha: f64);

    // ========================================================================
    // SURFACES
    // ========================================================================

    fn target(&self) -> Self::Surface;

    /// Paint another surface onto this one at the origin
    fn paint_surface(&mut self, surface: &Self::Surface);
}
