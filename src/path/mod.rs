// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Path authoring: the fluent command builder and the point tracking it
//! relies on.
//!
//! The tracker lives on the canvas, not on a builder, so a sequence of
//! builders continues from the same current point.

pub mod builder;
pub mod point;
pub mod tracker;

pub use builder::PathBuilder;
pub use point::{ControlPoint, CurveKind, PartialPoint};
pub use tracker::PointTracker;
