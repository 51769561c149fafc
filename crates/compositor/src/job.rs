//! End-to-end wallpaper compilation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use wallcomp_common::error::{WallcompError, WallcompResult};
use wallcomp_platform_core::{compute_bounds, Monitor, VirtualDesktopBounds};

use crate::canvas::{compose, Canvas, ChannelDepth};
use crate::encoder::{encode, OutputFormat};
use crate::loader::load_and_validate;

/// A wallpaper ready to be compiled.
#[derive(Debug, Clone)]
pub struct WallpaperJob {
    /// Output file path. The extension selects the format.
    pub output_path: PathBuf,

    /// Input image per monitor index.
    pub inputs: BTreeMap<usize, PathBuf>,
}

impl WallpaperJob {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            inputs: BTreeMap::new(),
        }
    }

    /// Assign an image to a monitor, replacing any earlier assignment.
    pub fn with_input(mut self, monitor_index: usize, path: impl Into<PathBuf>) -> Self {
        self.inputs.insert(monitor_index, path.into());
        self
    }
}

/// Summary of a finished compilation.
#[derive(Debug, Clone)]
pub struct CompileReport {
    pub bounds: VirtualDesktopBounds,
    pub format: OutputFormat,
    pub images_placed: usize,
    /// Monitors that received no image and stay transparent.
    pub uncovered_monitors: Vec<usize>,
}

/// Load, validate, compose, and encode a wallpaper for `monitors`.
///
/// Every input is validated before the output file is touched, so a failure
/// never leaves a partial wallpaper behind.
pub fn compile_wallpaper(
    monitors: &[Monitor],
    job: &WallpaperJob,
) -> WallcompResult<CompileReport> {
    let bounds = compute_bounds(monitors);
    Canvas::required_bytes(bounds, ChannelDepth::Eight)?;
    if job.inputs.len() > monitors.len() {
        return Err(WallcompError::TooManyInputs {
            inputs: job.inputs.len(),
            monitors: monitors.len(),
        });
    }

    tracing::info!(
        monitors = monitors.len(),
        inputs = job.inputs.len(),
        x_min = bounds.x_min,
        y_min = bounds.y_min,
        width = bounds.width(),
        height = bounds.height(),
        "Compiling wallpaper"
    );

    if let Some(&index) = job.inputs.keys().find(|&&i| i >= monitors.len()) {
        return Err(WallcompError::MonitorIndexOutOfRange {
            index,
            count: monitors.len(),
        });
    }

    let assignments = job
        .inputs
        .iter()
        .map(|(&index, path)| load_and_validate(path, index, &monitors[index]))
        .collect::<WallcompResult<Vec<_>>>()?;

    let canvas = compose(bounds, &assignments)?;
    let format = encode(canvas, &job.output_path)?;

    let uncovered_monitors: Vec<usize> = (0..monitors.len())
        .filter(|i| !job.inputs.contains_key(i))
        .collect();
    if !uncovered_monitors.is_empty() {
        tracing::debug!(?uncovered_monitors, "Monitors left without an image");
    }

    Ok(CompileReport {
        bounds,
        format,
        images_placed: assignments.len(),
        uncovered_monitors,
    })
}
