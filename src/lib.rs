// Copyright 2025 the Pathcraft Authors
// SPDX-License-Identifier: Apache-2.0

//! Pathcraft: vector path authoring over a 2D rendering engine
//!
//! Paths are described with a fluent command API or with path data
//! strings. The canvas tracks the current point, subpath start and last
//! control point across commands and keeps them consistent through
//! nested transform scopes, while the engine does the actual drawing.

use anyhow::Context;
use serde::Serialize;
use std::path::PathBuf;

pub mod canvas;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod paint;
pub mod path;
pub mod settings;
pub mod svg_path;
pub mod transform;

pub use canvas::{Canvas, FillOptions, StrokeOptions, SurfaceSource};
pub use config::CanvasConfig;
pub use engine::{RecordingEngine, RenderEngine};
pub use error::{CanvasError, Result};
pub use geometry::{Angle, LargeArc, Sweep};
pub use paint::{Color, Gradient, LineCap, LineJoin, Paint, StrokeStyle};
pub use path::{PathBuilder, PointTracker};
pub use transform::TransformScope;

const USAGE: &str = "Usage: pathcraft <path-data> [--config FILE] [--stroke-width LENGTH]";

/// Command-line options for the demo binary
#[derive(Debug, Default)]
struct Args {
    data: String,
    config: Option<PathBuf>,
    stroke_width: Option<String>,
}

/// What the demo prints after replaying the path data
#[derive(Debug, Serialize)]
struct Report {
    svg: String,
    current: Option<[f64; 2]>,
    start: Option<[f64; 2]>,
    stroke_width: f64,
    ops: usize,
}

/// Entry point for the pathcraft demo binary
pub fn run() -> anyhow::Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pathcraft=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => CanvasConfig::load(path)?,
        None => CanvasConfig::default(),
    };
    let mut canvas = Canvas::from_config(RecordingEngine::new(), &config)
        .context("Failed to create canvas")?;

    let stroke_width = match &args.stroke_width {
        Some(length) => canvas
            .parse_context()
            .resolve_length(length)
            .with_context(|| format!("Invalid stroke width: {length}"))?,
        None => settings::stroke::WIDTH,
    };

    tracing::info!("Replaying path data ({} bytes)", args.data.len());
    canvas
        .path_data(&args.data)
        .context("Failed to replay path data")?;
    let svg = canvas.engine().path().to_svg();
    canvas.stroke(Color::BLACK, &StrokeOptions::width(stroke_width));

    let tracker = canvas.tracker();
    let report = Report {
        svg,
        current: tracker.current().map(|p| [p.x, p.y]),
        start: tracker.start().map(|p| [p.x, p.y]),
        stroke_width,
        ops: canvas.engine().ops().len(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn parse_args(args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut data = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context(USAGE)?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--stroke-width" => {
                parsed.stroke_width = Some(args.next().context(USAGE)?);
            }
            _ if data.is_none() => data = Some(arg),
            _ => anyhow::bail!("Unexpected argument: {arg}\n{USAGE}"),
        }
    }
    parsed.data = data.context(USAGE)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(args(&["M0,0 L10,10", "--config", "canvas.toml"])).unwrap();
        assert_eq!(parsed.data, "M0,0 L10,10");
        assert_eq!(parsed.config, Some(PathBuf::from("canvas.toml")));
        assert_eq!(parsed.stroke_width, None);
    }

    #[test]
    fn test_parse_args_requires_path_data() {
        assert!(parse_args(args(&["--stroke-width", "2pt"])).is_err());
        assert!(parse_args(args(&["M0,0", "M1,1"])).is_err());
        assert!(parse_args(args(&["M0,0", "--config"])).is_err());
    }
}
