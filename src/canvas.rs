// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing session
//!
//! A [`Canvas`] owns a rendering engine together with the tracked path
//! state and the transform stack. Paths, shapes, paint and transform
//! scopes are all issued through it; transform scopes live in
//! [`crate::transform`].

use crate::config::CanvasConfig;
use crate::engine::RenderEngine;
use crate::error::Result;
use crate::geometry::{Angle, Sweep};
use crate::paint::{Color, FillRule, Gradient, GradientType, Paint, StrokeStyle, SurfaceKind};
use crate::path::{PathBuilder, PointTracker};
use crate::settings;
use crate::svg_path::ParseContext;
use crate::transform::TransformStack;
use kurbo::{Affine, Point, Rect, Vec2};

/// Options for [`Canvas::fill`]
#[derive(Debug, Clone, PartialEq)]
pub struct FillOptions {
    /// Multiplies the paint's alpha
    pub opacity: f64,
    pub even_odd: bool,
    /// Keep the path after filling
    pub keep: bool,
    /// Interpret gradient coordinates in the current user space. When
    /// false they are read in device space.
    pub affect: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            even_odd: false,
            keep: false,
            affect: true,
        }
    }
}

impl FillOptions {
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn even_odd(mut self) -> Self {
        self.even_odd = true;
        self
    }

    pub fn keep(mut self) -> Self {
        self.keep = true;
        self
    }

    pub fn unaffected(mut self) -> Self {
        self.affect = false;
        self
    }
}

/// Options for [`Canvas::stroke`]
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeOptions {
    pub style: StrokeStyle,
    pub opacity: f64,
    pub keep: bool,
    pub affect: bool,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            style: StrokeStyle::default(),
            opacity: 1.0,
            keep: false,
            affect: true,
        }
    }
}

impl StrokeOptions {
    pub fn width(width: f64) -> Self {
        Self {
            style: StrokeStyle::new(width),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn keep(mut self) -> Self {
        self.keep = true;
        self
    }

    pub fn unaffected(mut self) -> Self {
        self.affect = false;
        self
    }
}

/// Where [`Canvas::set_source`] takes its pixels from
pub enum SurfaceSource<'s, E: RenderEngine> {
    Canvas(&'s Canvas<E>),
    Engine(&'s E),
    Surface(&'s E::Surface),
}

impl<E: RenderEngine> SurfaceSource<'_, E> {
    pub fn surface(&self) -> E::Surface {
        match self {
            SurfaceSource::Canvas(canvas) => canvas.engine.target(),
            SurfaceSource::Engine(engine) => engine.target(),
            SurfaceSource::Surface(surface) => (*surface).clone(),
        }
    }
}

/// A drawing session on a rendering engine
pub struct Canvas<E: RenderEngine> {
    pub(crate) engine: E,
    pub(crate) tracker: PointTracker,
    pub(crate) transforms: TransformStack,
    width: f64,
    height: f64,
    dpi: f64,
    font_size_pt: f64,
    surface_kind: SurfaceKind,
}

impl<E: RenderEngine> Canvas<E> {
    pub fn new(engine: E, width: f64, height: f64) -> Self {
        Self {
            engine,
            tracker: PointTracker::new(),
            transforms: TransformStack::new(),
            width,
            height,
            dpi: settings::units::DPI,
            font_size_pt: settings::units::FONT_SIZE_PT,
            surface_kind: SurfaceKind::default(),
        }
    }

    /// Build a canvas from configuration, painting the background if one
    /// is set
    pub fn from_config(engine: E, config: &CanvasConfig) -> Result<Self> {
        let surface_kind = config.surface_kind()?;
        let background = config.background_color()?;

        let mut canvas = Self::new(engine, f64::from(config.width), f64::from(config.height));
        canvas.dpi = config.dpi;
        canvas.font_size_pt = config.font_size;
        canvas.surface_kind = surface_kind;

        if let Some(color) = background {
            let paint = Paint::Solid(color.with_alpha(config.background_opacity));
            canvas.engine.save();
            canvas.engine.paint(&paint, 1.0);
            canvas.engine.restore();
        }
        tracing::debug!(
            "canvas {}x{} ({:?}) created",
            canvas.width,
            canvas.height,
            canvas.surface_kind
        );
        Ok(canvas)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    pub fn tracker(&self) -> &PointTracker {
        &self.tracker
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn surface_kind(&self) -> SurfaceKind {
        self.surface_kind
    }

    /// Current engine transform
    pub fn ctm(&self) -> Affine {
        self.engine.matrix()
    }

    /// Unit context for path data drawn on this canvas
    pub fn parse_context(&self) -> ParseContext {
        ParseContext::new(self.width, self.height)
            .with_dpi(self.dpi)
            .with_font_size_pt(self.font_size_pt)
    }

    // ========================================================================
    // PATHS AND SHAPES
    // ========================================================================

    /// Start issuing path commands
    pub fn path(&mut self) -> PathBuilder<'_, E> {
        PathBuilder::new(self)
    }

    /// Start a path from path data
    pub fn path_data(&mut self, data: &str) -> Result<PathBuilder<'_, E>> {
        self.path().d(data)
    }

    /// Add a circle as a new subpath. The subpath starts at angle zero,
    /// which is where a following close returns to.
    pub fn circle(&mut self, radius: f64, center: impl Into<Point>) -> &mut Self {
        let center = center.into();
        self.engine.new_sub_path();
        self.path()
            .arc_center(center, radius, Angle::ZERO, Angle::FULL, Sweep::Positive);
        let start = Point::new(center.x + radius, center.y);
        self.tracker.update(None, Some(start.into()), None, false);
        self
    }

    /// Add an ellipse as a new subpath. Nothing is added if either radius
    /// is not positive.
    pub fn ellipse(&mut self, rx: f64, ry: f64, center: impl Into<Point>) -> &mut Self {
        if !(rx > 0.0 && ry > 0.0) {
            tracing::debug!("ellipse radii {}x{} are not positive, skipped", rx, ry);
            return self;
        }
        let center = center.into();
        let k = ry / rx;
        self.engine.new_sub_path();
        {
            let mut scope = self.open_scope();
            scope.apply_transform(
                Affine::scale_non_uniform(1.0, k),
                Affine::scale_non_uniform(1.0, 1.0 / k),
            );
            scope.path().arc_center(
                (center.x, center.y / k),
                rx,
                Angle::ZERO,
                Angle::FULL,
                Sweep::Positive,
            );
        }
        let start = Point::new(center.x + rx, center.y);
        self.tracker.update(None, Some(start.into()), None, false);
        self
    }

    /// Add a rectangle at `origin`, or centered on it. The current point
    /// and subpath start move to the rectangle's first corner.
    pub fn rect(
        &mut self,
        width: f64,
        height: f64,
        origin: impl Into<Point>,
        center: bool,
    ) -> &mut Self {
        let mut origin = origin.into();
        if center {
            origin -= Vec2::new(width / 2.0, height / 2.0);
        }
        self.engine
            .rectangle(Rect::new(origin.x, origin.y, origin.x + width, origin.y + height));
        self.tracker.update(None, Some(origin.into()), None, false);
        self
    }

    // ========================================================================
    // PAINT
    // ========================================================================

    /// Fill the current path.
    ///
    /// `Paint::None` only discards the path (unless kept). A gradient
    /// painted below full opacity is painted through a clip of the path.
    pub fn fill(&mut self, paint: impl Into<Paint>, options: &FillOptions) -> &mut Self {
        let rule = if options.even_odd {
            FillRule::EvenOdd
        } else {
            FillRule::NonZero
        };
        match paint.into() {
            Paint::None => {
                if !options.keep {
                    self.engine.new_path();
                }
            }
            Paint::Solid(color) => {
                let paint = Paint::Solid(color.with_alpha(color.a * options.opacity));
                self.engine.fill(&paint, rule, options.keep);
            }
            paint @ Paint::Gradient(_) => {
                self.in_paint_space(options.affect, |canvas| {
                    if options.opacity < 1.0 {
                        let mut scope = canvas.clip(options.keep);
                        scope.engine.paint(&paint, options.opacity);
                    } else {
                        canvas.engine.fill(&paint, rule, options.keep);
                    }
                });
            }
        }
        self
    }

    /// Stroke the current path
    pub fn stroke(&mut self, paint: impl Into<Paint>, options: &StrokeOptions) -> &mut Self {
        match paint.into() {
            Paint::None => {
                if !options.keep {
                    self.engine.new_path();
                }
            }
            Paint::Solid(color) => {
                let paint = Paint::Solid(color.with_alpha(color.a * options.opacity));
                self.engine.stroke(&paint, &options.style, options.keep);
            }
            paint @ Paint::Gradient(_) => {
                self.in_paint_space(options.affect, |canvas| {
                    canvas.engine.stroke(&paint, &options.style, options.keep);
                });
            }
        }
        self
    }

    /// Run `f` with the engine transform reset to identity unless `affect`.
    /// The path is already in device space, so only the paint moves.
    fn in_paint_space(&mut self, affect: bool, f: impl FnOnce(&mut Self)) {
        if affect {
            f(self);
            return;
        }
        self.engine.save();
        self.engine.identity_matrix();
        f(self);
        self.engine.restore();
    }

    pub fn linear_gradient(&self, start: impl Into<Point>, end: impl Into<Point>) -> Gradient {
        Gradient::linear(start.into(), end.into())
    }

    pub fn radial_gradient(
        &self,
        start_radius: f64,
        start: impl Into<Point>,
        end_radius: f64,
        end: impl Into<Point>,
    ) -> Gradient {
        Gradient::radial(start.into(), start_radius, end.into(), end_radius)
    }

    /// Gradient by kind name (`linear` or `radial`); radii are ignored for
    /// linear gradients
    pub fn gradient(
        &self,
        kind: &str,
        start: impl Into<Point>,
        start_radius: f64,
        end: impl Into<Point>,
        end_radius: f64,
    ) -> Result<Gradient> {
        let kind: GradientType = kind.parse()?;
        Ok(Gradient::new(kind, start.into(), start_radius, end.into(), end_radius))
    }

    /// Paint the whole clip region with a solid color
    pub fn paint_color(&mut self, color: impl Into<Color>, opacity: f64) -> &mut Self {
        let color = color.into();
        self.engine.paint(&Paint::Solid(color), opacity);
        self
    }

    // ========================================================================
    // SOURCES AND RESETS
    // ========================================================================

    /// Paint another surface onto this canvas at the origin
    pub fn set_source(&mut self, source: SurfaceSource<'_, E>) -> &mut Self {
        let surface = source.surface();
        self.engine.paint_surface(&surface);
        self
    }

    /// Snapshot of everything drawn so far
    pub fn snapshot(&self) -> E::Surface {
        self.engine.target()
    }

    /// Reset the engine transform to identity. Tracked points are not
    /// adjusted.
    pub fn reset_transform(&mut self) -> &mut Self {
        self.engine.identity_matrix();
        self
    }

    pub fn reset_clip(&mut self) -> &mut Self {
        self.engine.reset_clip();
        self
    }

    /// Reset both the transform and the clip
    pub fn reset(&mut self) -> &mut Self {
        self.reset_transform().reset_clip()
    }
}
