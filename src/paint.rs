// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Paint sources and stroke styles handed to the engine.
//!
//! Keyword and color parsing happens here, before anything reaches the
//! engine, so a bad keyword never leaves a half-issued paint call behind.

use crate::error::{CanvasError, Result};
use crate::settings;
use kurbo::Point;
use std::str::FromStr;

// ============================================================================
// COLOR
// ============================================================================

/// RGBA color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

/// Parse `#rgb`, `#rrggbb` or a shorter hex string (left-padded with zeros).
/// The leading `#` is optional.
impl FromStr for Color {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CanvasError::InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.is_empty() || hex.len() > 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded = if hex.len() <= 3 {
            hex.chars().flat_map(|c| [c, c]).collect::<String>()
        } else {
            hex.to_string()
        };
        let expanded = format!("{expanded:0>6}");

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// `0xRRGGBB`
impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color::from_rgb8((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::from_rgb8(r, g, b)
    }
}

impl From<(f64, f64, f64)> for Color {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        Color::rgb(r, g, b)
    }
}

// ============================================================================
// LINE STYLE
// ============================================================================

/// Line cap style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Accepts the keyword or its index (`butt`/`0`, `round`/`1`, `square`/`2`)
impl FromStr for LineCap {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "butt" | "0" => Ok(LineCap::Butt),
            "round" | "1" => Ok(LineCap::Round),
            "square" | "2" => Ok(LineCap::Square),
            _ => Err(CanvasError::UnknownLineCap(s.to_string())),
        }
    }
}

/// Line join style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Accepts the keyword or its index (`miter`/`0`, `round`/`1`, `bevel`/`2`)
impl FromStr for LineJoin {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "miter" | "0" => Ok(LineJoin::Miter),
            "round" | "1" => Ok(LineJoin::Round),
            "bevel" | "2" => Ok(LineJoin::Bevel),
            _ => Err(CanvasError::UnknownLineJoin(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Stroke geometry passed to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f64,
    /// Alternating on and off lengths; empty means a solid line and a
    /// single entry is used for both
    pub dash: Vec<f64>,
    pub dash_offset: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: settings::stroke::WIDTH,
            cap: LineCap::default(),
            join: LineJoin::default(),
            miter_limit: settings::stroke::MITER_LIMIT,
            dash: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

impl StrokeStyle {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    /// Dash with alternating on and off lengths
    pub fn with_dash(mut self, dash: impl Into<Vec<f64>>, offset: f64) -> Self {
        self.dash = dash.into();
        self.dash_offset = offset;
        self
    }

    /// Dash with one length for both the on and off intervals
    pub fn with_dash_length(self, length: f64, offset: f64) -> Self {
        self.with_dash([length], offset)
    }
}

// ============================================================================
// GRADIENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientType {
    Linear,
    Radial,
}

impl FromStr for GradientType {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(GradientType::Linear),
            "radial" => Ok(GradientType::Radial),
            _ => Err(CanvasError::UnknownGradientKind(s.to_string())),
        }
    }
}

/// Gradient geometry in the coordinate space active when it is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientShape {
    Linear {
        start: Point,
        end: Point,
    },
    /// Two-circle radial gradient
    Radial {
        start: Point,
        start_radius: f64,
        end: Point,
        end_radius: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub shape: GradientShape,
    /// Sorted by offset; equal offsets keep insertion order
    pub stops: Vec<ColorStop>,
}

impl Gradient {
    pub fn linear(start: Point, end: Point) -> Self {
        Self {
            shape: GradientShape::Linear { start, end },
            stops: Vec::new(),
        }
    }

    pub fn radial(start: Point, start_radius: f64, end: Point, end_radius: f64) -> Self {
        Self {
            shape: GradientShape::Radial {
                start,
                start_radius,
                end,
                end_radius,
            },
            stops: Vec::new(),
        }
    }

    /// Build a gradient from its type; radii are ignored for linear gradients
    pub fn new(
        kind: GradientType,
        start: Point,
        start_radius: f64,
        end: Point,
        end_radius: f64,
    ) -> Self {
        match kind {
            GradientType::Linear => Self::linear(start, end),
            GradientType::Radial => Self::radial(start, start_radius, end, end_radius),
        }
    }

    /// Add a color stop at `offset` (clamped to `0.0..=1.0`)
    pub fn stop(mut self, offset: f64, color: impl Into<Color>, opacity: f64) -> Self {
        let offset = offset.clamp(0.0, 1.0);
        let index = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(
            index,
            ColorStop {
                offset,
                color: color.into().with_alpha(opacity),
            },
        );
        self
    }
}

// ============================================================================
// PAINT
// ============================================================================

/// What a fill or stroke paints with
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Paint {
    /// Paint nothing; the path is discarded unless kept
    #[default]
    None,
    Solid(Color),
    Gradient(Gradient),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<Gradient> for Paint {
    fn from(gradient: Gradient) -> Self {
        Paint::Gradient(gradient)
    }
}

impl From<&Gradient> for Paint {
    fn from(gradient: &Gradient) -> Self {
        Paint::Gradient(gradient.clone())
    }
}

// ============================================================================
// SURFACES
// ============================================================================

/// Output surface kinds a canvas can be configured for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SurfaceKind {
    #[default]
    Image,
    Svg,
    Pdf,
    Ps,
    Recording,
}

impl FromStr for SurfaceKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" | "png" => Ok(SurfaceKind::Image),
            "svg" => Ok(SurfaceKind::Svg),
            "pdf" => Ok(SurfaceKind::Pdf),
            "ps" | "postscript" => Ok(SurfaceKind::Ps),
            "recording" | "record" => Ok(SurfaceKind::Recording),
            _ => Err(CanvasError::UnknownSurfaceKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!("#ffffff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#82a".parse::<Color>().unwrap(), Color::from_rgb8(0x88, 0x22, 0xaa));
        assert_eq!("fff".parse::<Color>().unwrap(), Color::WHITE);
        // short strings are left-padded
        assert_eq!("ff00".parse::<Color>().unwrap(), Color::from_rgb8(0x00, 0xff, 0x00));
    }

    #[test]
    fn test_invalid_color() {
        assert!(matches!("#zzz".parse::<Color>(), Err(CanvasError::InvalidColor(_))));
        assert!("".parse::<Color>().is_err());
        assert!("#1234567".parse::<Color>().is_err());
    }

    #[test]
    fn test_color_from_integer_and_tuples() {
        assert_eq!(Color::from(0xff0000_u32), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::from((0u8, 128u8, 0u8)), Color::from_rgb8(0, 128, 0));
        assert_eq!(Color::from((0.0, 1.0, 1.0)), Color::rgb(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_line_keywords() {
        assert_eq!("round".parse::<LineCap>().unwrap(), LineCap::Round);
        assert_eq!("2".parse::<LineCap>().unwrap(), LineCap::Square);
        assert_eq!("bevel".parse::<LineJoin>().unwrap(), LineJoin::Bevel);
        assert!(matches!("arrow".parse::<LineCap>(), Err(CanvasError::UnknownLineCap(_))));
        assert!(matches!("sharp".parse::<LineJoin>(), Err(CanvasError::UnknownLineJoin(_))));
    }

    #[test]
    fn test_dash_forms() {
        let single = StrokeStyle::new(2.0).with_dash_length(4.0, 1.0);
        assert_eq!(single.dash, vec![4.0]);
        assert_eq!(single.dash_offset, 1.0);

        let pattern = StrokeStyle::new(2.0).with_dash(vec![6.0, 2.0, 1.0, 2.0], 0.0);
        assert_eq!(pattern.dash, vec![6.0, 2.0, 1.0, 2.0]);
        assert_eq!(StrokeStyle::default().dash, Vec::<f64>::new());
    }

    #[test]
    fn test_gradient_stops_sorted() {
        let gradient = Gradient::linear(Point::new(0.0, 0.0), Point::new(100.0, 0.0))
            .stop(0.9, 0xff0000_u32, 1.0)
            .stop(0.1, 0x00ff00_u32, 1.0)
            .stop(0.32, Color::WHITE, 1.0)
            .stop(0.32, Color::BLACK, 0.5);

        let offsets: Vec<f64> = gradient.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.1, 0.32, 0.32, 0.9]);
        // hard stop keeps insertion order
        assert_eq!(gradient.stops[1].color, Color::WHITE);
        assert_eq!(gradient.stops[2].color.a, 0.5);
    }

    #[test]
    fn test_kind_keywords() {
        assert_eq!("Radial".parse::<GradientType>().unwrap(), GradientType::Radial);
        assert!(matches!(
            "conic".parse::<GradientType>(),
            Err(CanvasError::UnknownGradientKind(_))
        ));
        assert_eq!("postscript".parse::<SurfaceKind>().unwrap(), SurfaceKind::Ps);
        assert_eq!("PNG".parse::<SurfaceKind>().unwrap(), SurfaceKind::Image);
        assert!(matches!(
            "gif".parse::<SurfaceKind>(),
            Err(CanvasError::UnknownSurfaceKind(_))
        ));
    }
}
