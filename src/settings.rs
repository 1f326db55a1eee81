// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Library settings and default constants.
//!
//! These are the fixed defaults every canvas starts from. Values that a
//! caller may want to change per canvas live in `config.rs` and fall back
//! to the constants here.

// ============================================================================
// UNIT SETTINGS
// ============================================================================
/// Resolution used to convert physical units in path data (pixels per inch)
const DPI: f64 = 96.0;

/// Default font size for `em`/`ex` lengths, in points
const FONT_SIZE_PT: f64 = 12.0;

// ============================================================================
// ARC SETTINGS
// ============================================================================
/// Flattening tolerance used when the recording engine turns arcs into
/// cubic segments (device units)
const ARC_TOLERANCE: f64 = 0.1;

/// Below this determinant a transform is treated as singular
const SINGULAR_EPSILON: f64 = 1e-12;

// ============================================================================
// STROKE SETTINGS
// ============================================================================
/// Default stroke width
const STROKE_WIDTH: f64 = 2.0;

/// Default miter limit
const MITER_LIMIT: f64 = 10.0;

// ============================================================================
// CANVAS SETTINGS
// ============================================================================
const CANVAS_WIDTH: u32 = 600;
const CANVAS_HEIGHT: u32 = 400;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Unit conversion defaults for the path-data adapter
pub mod units {
    /// Pixels per inch
    pub const DPI: f64 = super::DPI;

    /// Default font size in points (12pt == 16px at 96 DPI)
    pub const FONT_SIZE_PT: f64 = super::FONT_SIZE_PT;
}

/// Arc and transform numerics
pub mod arc {
    /// Flattening tolerance for arc approximation
    pub const TOLERANCE: f64 = super::ARC_TOLERANCE;

    /// Determinant threshold for singular transforms
    pub const SINGULAR_EPSILON: f64 = super::SINGULAR_EPSILON;
}

/// Stroke defaults
pub mod stroke {
    pub const WIDTH: f64 = super::STROKE_WIDTH;
    pub const MITER_LIMIT: f64 = super::MITER_LIMIT;
}

/// Canvas size used when no configuration is given
pub mod canvas {
    pub const WIDTH: u32 = super::CANVAS_WIDTH;
    pub const HEIGHT: u32 = super::CANVAS_HEIGHT;
}
