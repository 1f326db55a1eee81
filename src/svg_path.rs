// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Path data strings
//!
//! Path data (`M10,10 h50 a25,25 0 1,1 50,0 z`) is parsed with `svgtypes`
//! and each segment is replayed onto a [`PathBuilder`], so string paths
//! share the tracked state of fluent ones. [`ParseContext`] carries the
//! canvas size and the DPI/font-size defaults that unit suffixes resolve
//! against.

use crate::engine::RenderEngine;
use crate::error::{CanvasError, Result};
use crate::geometry::{Angle, LargeArc, Sweep};
use crate::path::PathBuilder;
use crate::settings;
use std::str::FromStr;
use svgtypes::{Length, LengthUnit, PathParser, PathSegment};

/// Dimensions and unit defaults for resolving lengths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseContext {
    pub width: f64,
    pub height: f64,
    /// Pixels per inch
    pub dpi: f64,
    /// Font size for `em`/`ex`, in points
    pub font_size_pt: f64,
}

impl ParseContext {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            dpi: settings::units::DPI,
            font_size_pt: settings::units::FONT_SIZE_PT,
        }
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_font_size_pt(mut self, font_size_pt: f64) -> Self {
        self.font_size_pt = font_size_pt;
        self
    }

    /// Font size in pixels (12pt is 16px at 96 DPI)
    pub fn font_size(&self) -> f64 {
        self.font_size_pt * self.dpi / 72.0
    }

    /// Resolve a length such as `2.5mm` or `50%` to pixels.
    ///
    /// Percentages are relative to the normalized diagonal,
    /// `sqrt((w² + h²) / 2)`.
    pub fn resolve_length(&self, text: &str) -> Result<f64> {
        let length = Length::from_str(text.trim())
            .map_err(|_| CanvasError::InvalidLength(text.to_string()))?;
        Ok(self.to_pixels(length, Axis::Other))
    }

    fn to_pixels(&self, length: Length, axis: Axis) -> f64 {
        let n = length.number;
        match length.unit {
            LengthUnit::None | LengthUnit::Px => n,
            LengthUnit::Pt => n * self.dpi / 72.0,
            LengthUnit::Pc => n * self.dpi / 6.0,
            LengthUnit::In => n * self.dpi,
            LengthUnit::Cm => n * self.dpi / 2.54,
            LengthUnit::Mm => n * self.dpi / 25.4,
            LengthUnit::Em => n * self.font_size(),
            LengthUnit::Ex => n * self.font_size() / 2.0,
            LengthUnit::Percent => {
                let reference = match axis {
                    Axis::X => self.width,
                    Axis::Y => self.height,
                    Axis::Other | Axis::Flag => {
                        ((self.width.powi(2) + self.height.powi(2)) / 2.0).sqrt()
                    }
                };
                n / 100.0 * reference
            }
        }
    }
}

/// What a path-data argument measures; percentages follow the axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Other,
    Flag,
}

fn argument_axes(command: u8) -> &'static [Axis] {
    use Axis::{Flag, Other, X, Y};
    match command.to_ascii_lowercase() {
        b'm' | b'l' | b't' => &[X, Y],
        b'h' => &[X],
        b'v' => &[Y],
        b'c' => &[X, Y, X, Y, X, Y],
        b's' | b'q' => &[X, Y, X, Y],
        b'a' => &[X, Y, Other, Flag, Flag, X, Y],
        _ => &[],
    }
}

fn is_command(byte: u8) -> bool {
    b"MmLlHhVvCcSsQqTtAaZz".contains(&byte)
}

const UNITS: [&[u8]; 8] = [b"px", b"pt", b"pc", b"in", b"cm", b"mm", b"em", b"ex"];

/// End of the number (and unit suffix) starting at `start`
fn length_end(bytes: &[u8], start: usize) -> usize {
    let digits = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };
    let mut i = start;
    if matches!(bytes.get(i), Some(b'+' | b'-')) {
        i += 1;
    }
    let integer = digits(i);
    let mut end = integer;
    if bytes.get(end) == Some(&b'.') {
        end = digits(end + 1);
    }
    if end == i || (end == i + 1 && integer == i) {
        // no digits at all
        return start;
    }
    // `e` starts an exponent only when a digit follows; `1em` is a unit
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            end = digits(exp);
        }
    }
    if bytes.get(end) == Some(&b'%') {
        end + 1
    } else if UNITS.iter().any(|unit| bytes[end..].starts_with(unit)) {
        end + 2
    } else {
        end
    }
}

/// Rewrite unit-suffixed arguments as plain pixel numbers.
///
/// Scanning stops at the first byte it does not understand and the rest
/// is passed through untouched, so the parser reports the error at the
/// same segment.
fn resolve_units(data: &str, context: &ParseContext) -> String {
    let bytes = data.as_bytes();
    let mut out = String::with_capacity(data.len());
    let mut axes: &[Axis] = &[];
    let mut index = 0;
    let mut pos = 0;
    let push = |out: &mut String, token: &str| {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    };
    while pos < bytes.len() {
        let byte = bytes[pos];
        if byte.is_ascii_whitespace() || byte == b',' {
            pos += 1;
            continue;
        }
        if is_command(byte) {
            push(&mut out, &data[pos..pos + 1]);
            axes = argument_axes(byte);
            index = 0;
            pos += 1;
            continue;
        }
        if axes.is_empty() {
            break;
        }
        let axis = axes[index % axes.len()];
        if axis == Axis::Flag {
            // flags are a single digit and may be written without separators
            if !matches!(byte, b'0' | b'1') {
                break;
            }
            push(&mut out, &data[pos..pos + 1]);
            pos += 1;
        } else {
            let end = length_end(bytes, pos);
            let Ok(length) = Length::from_str(&data[pos..end]) else {
                break;
            };
            push(&mut out, &context.to_pixels(length, axis).to_string());
            pos = end;
        }
        index += 1;
    }
    if pos < bytes.len() {
        push(&mut out, &data[pos..]);
    }
    out
}

/// Replay path data onto `builder`.
///
/// Coordinates may carry unit suffixes, resolved against `context`.
/// Segments are applied as they are parsed, so on malformed data the
/// segments before the error have already been drawn.
pub fn replay<'a, E: RenderEngine>(
    mut builder: PathBuilder<'a, E>,
    data: &str,
    context: &ParseContext,
) -> Result<PathBuilder<'a, E>> {
    let data = resolve_units(data, context);
    let mut count = 0usize;
    for segment in PathParser::from(data.as_str()) {
        let segment = segment.map_err(|err| {
            tracing::debug!("path data rejected after {} segments: {}", count, err);
            CanvasError::PathData(err.to_string())
        })?;
        builder = apply(builder, segment);
        count += 1;
    }
    tracing::trace!("replayed {} path segments", count);
    Ok(builder)
}

fn apply<E: RenderEngine>(
    builder: PathBuilder<'_, E>,
    segment: PathSegment,
) -> PathBuilder<'_, E> {
    match segment {
        PathSegment::MoveTo { abs: true, x, y } => builder.move_to((x, y)),
        PathSegment::MoveTo { abs: false, x, y } => builder.rel_move_to((x, y)),
        PathSegment::LineTo { abs: true, x, y } => builder.line_to((x, y)),
        PathSegment::LineTo { abs: false, x, y } => builder.rel_line_to((x, y)),
        PathSegment::HorizontalLineTo { abs: true, x } => builder.horizontal_to(x),
        PathSegment::HorizontalLineTo { abs: false, x } => builder.rel_horizontal(x),
        PathSegment::VerticalLineTo { abs: true, y } => builder.vertical_to(y),
        PathSegment::VerticalLineTo { abs: false, y } => builder.rel_vertical(y),
        PathSegment::CurveTo {
            abs,
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        } => {
            if abs {
                builder.cubic_to((x1, y1), (x2, y2), (x, y))
            } else {
                builder.rel_cubic_to((x1, y1), (x2, y2), (x, y))
            }
        }
        PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
            if abs {
                builder.smooth_cubic_to((x2, y2), (x, y))
            } else {
                builder.rel_smooth_cubic_to((x2, y2), (x, y))
            }
        }
        PathSegment::Quadratic { abs, x1, y1, x, y } => {
            if abs {
                builder.quad_to((x1, y1), (x, y))
            } else {
                builder.rel_quad_to((x1, y1), (x, y))
            }
        }
        PathSegment::SmoothQuadratic { abs: true, x, y } => builder.smooth_quad_to((x, y)),
        PathSegment::SmoothQuadratic { abs: false, x, y } => builder.rel_smooth_quad_to((x, y)),
        PathSegment::EllipticalArc {
            abs,
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            x,
            y,
        } => {
            let radii = (rx.abs(), ry.abs());
            let large = LargeArc(large_arc);
            let sweep = Sweep::from(sweep);
            let rotation = Angle::degrees(x_axis_rotation);
            if abs {
                builder.ellipse_arc_to(radii, (x, y), large, sweep, rotation)
            } else {
                builder.rel_ellipse_arc_to(radii, (x, y), large, sweep, rotation)
            }
        }
        PathSegment::ClosePath { .. } => builder.close(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::engine::{EngineCall, RecordingEngine};
    use kurbo::Point;

    fn canvas() -> Canvas<RecordingEngine> {
        Canvas::new(RecordingEngine::new(), 600.0, 400.0)
    }

    #[test]
    fn test_font_size_defaults_to_sixteen_pixels() {
        let context = ParseContext::new(600.0, 400.0);
        assert_eq!(context.font_size(), 16.0);
        assert_eq!(context.resolve_length("1em").unwrap(), 16.0);
    }

    #[test]
    fn test_resolve_units() {
        let context = ParseContext::new(300.0, 400.0);
        assert_eq!(context.resolve_length("12").unwrap(), 12.0);
        assert_eq!(context.resolve_length("1in").unwrap(), 96.0);
        assert_eq!(context.resolve_length("72pt").unwrap(), 96.0);
        assert!((context.resolve_length("2.54cm").unwrap() - 96.0).abs() < 1e-9);
        // sqrt((300² + 400²) / 2) = sqrt(125000)
        let diagonal = 125_000f64.sqrt();
        assert!((context.resolve_length("10%").unwrap() - diagonal / 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_length() {
        let context = ParseContext::new(600.0, 400.0);
        assert_eq!(
            context.resolve_length("wide"),
            Err(CanvasError::InvalidLength("wide".to_string()))
        );
    }

    #[test]
    fn test_replay_updates_tracker() {
        let mut canvas = canvas();
        canvas.path_data("M10,10 L20,10 q5,5 10,0 Z").unwrap();
        assert_eq!(canvas.tracker().current(), Some(Point::new(10.0, 10.0)));
        assert_eq!(canvas.tracker().last_control(), None);
    }

    #[test]
    fn test_fluent_path_continues_string_path() {
        let mut canvas = canvas();
        canvas.path_data("M100,75").unwrap().arc_to(
            25.0,
            (125.0, 100.0),
            LargeArc(true),
            Sweep::Positive,
        );
        assert_eq!(canvas.tracker().current(), Some(Point::new(125.0, 100.0)));
    }

    #[test]
    fn test_malformed_data_keeps_earlier_segments() {
        let mut canvas = canvas();
        let result = canvas.path_data("M10,10 L20,20 L30,");
        assert!(matches!(result, Err(CanvasError::PathData(_))));
        assert_eq!(canvas.tracker().current(), Some(Point::new(20.0, 20.0)));
        assert_eq!(
            canvas.engine().calls(),
            &[
                EngineCall::MoveTo(Point::new(10.0, 10.0)),
                EngineCall::LineTo(Point::new(20.0, 20.0))
            ]
        );
    }

    #[test]
    fn test_path_data_resolves_units() {
        let mut canvas = canvas();
        canvas.path_data("M1in,0").unwrap();
        assert_eq!(canvas.tracker().current(), Some(Point::new(96.0, 0.0)));

        canvas.path_data("L10mm,0").unwrap();
        let current = canvas.tracker().current().unwrap();
        assert!((current.x - 37.795_275_590_551_18).abs() < 1e-9);
        assert_eq!(current.y, 0.0);
    }

    #[test]
    fn test_path_data_percent_follows_axis() {
        // 600 x 400 canvas
        let mut canvas = canvas();
        canvas.path_data("M50%,25% h10% v-10%").unwrap();
        assert_eq!(canvas.tracker().current(), Some(Point::new(360.0, 60.0)));
        assert_eq!(
            canvas.engine().calls()[0],
            EngineCall::MoveTo(Point::new(300.0, 100.0))
        );
    }

    #[test]
    fn test_unit_resolution_keeps_plain_data() {
        let context = ParseContext::new(600.0, 400.0);
        assert_eq!(
            resolve_units("M1e1,2em a5,5 0 1050,-2.5e-1z", &context),
            "M 10 32 a 5 5 0 1 0 50 -0.25 z"
        );
        // unknown input is left for the parser to reject
        assert_eq!(resolve_units("M1,2 L3,x", &context), "M 1 2 L 3 x");
    }

    #[test]
    fn test_zero_radius_arc_draws_line() {
        let mut canvas = canvas();
        canvas.path_data("M0,0 A0,10 0 0,1 30,40").unwrap();
        assert_eq!(
            canvas.engine().calls().last(),
            Some(&EngineCall::LineTo(Point::new(30.0, 40.0)))
        );
    }
}
