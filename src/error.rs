// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types for canvas and path operations
//!
//! Only invalid input is an error. Geometric degeneracies (zero radius,
//! radius too small for the chord) have defined fallbacks and never
//! surface here.

use thiserror::Error;

/// Errors reported synchronously by canvas, paint and path-data operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanvasError {
    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("unknown line cap '{0}' (supported: butt, round, square)")]
    UnknownLineCap(String),

    #[error("unknown line join '{0}' (supported: miter, round, bevel)")]
    UnknownLineJoin(String),

    #[error("unknown gradient kind '{0}' (supported: linear, radial)")]
    UnknownGradientKind(String),

    #[error("unknown surface kind '{0}' (supported: image, svg, pdf, ps, recording)")]
    UnknownSurfaceKind(String),

    /// The transform has no inverse, so tracked points cannot follow it
    #[error("singular transform: {0:?}")]
    SingularTransform([f64; 6]),

    #[error("invalid path data: {0}")]
    PathData(String),

    #[error("invalid length '{0}'")]
    InvalidLength(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CanvasError>;
