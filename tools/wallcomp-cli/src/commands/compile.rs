//! Compile a wallpaper from per-monitor images.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use wallcomp_common::error::{WallcompError, WallcompResult};
use wallcomp_compositor::{compile_wallpaper, WallpaperJob};
use wallcomp_platform_core::MonitorSource;

use crate::args::InputArg;
use crate::commands::monitors;

pub const USAGE: &str = "wallcomp -i0 inFile0Path [-i1 inFile1Path [...]] -o outFilePath";

/// Check the compile flags and build a job from them.
///
/// On a usage error the usage line and the live monitor list are written to
/// `out` before the error is returned, so the operator can pick indices
/// without running a separate command.
pub fn plan(
    source: &dyn MonitorSource,
    output: Option<PathBuf>,
    inputs: Vec<InputArg>,
    out: &mut impl Write,
) -> WallcompResult<WallpaperJob> {
    let job = match output {
        None => Err(WallcompError::usage("no output file path was given")),
        Some(_) if inputs.is_empty() => Err(WallcompError::usage("no input file paths were given")),
        Some(output) => build_job(output, inputs),
    };

    if let Err(WallcompError::Usage { .. }) = &job {
        let printed = writeln!(out, "Usage: {USAGE}")
            .and_then(|()| monitors::write_for_usage(source, out));
        if let Err(e) = printed {
            tracing::debug!("Could not print usage: {e}");
        }
    }
    job
}

pub fn run(source: &dyn MonitorSource, job: &WallpaperJob) -> anyhow::Result<()> {
    let monitors = source
        .enumerate()
        .with_context(|| format!("Failed to read monitors from {}", source.describe()))?;

    let report = compile_wallpaper(&monitors, job)?;

    tracing::info!(
        images = report.images_placed,
        uncovered = report.uncovered_monitors.len(),
        format = report.format.name(),
        "Done"
    );
    Ok(())
}

/// Turn parsed flags into a job, rejecting a monitor index given twice.
fn build_job(output: PathBuf, inputs: Vec<InputArg>) -> WallcompResult<WallpaperJob> {
    let mut job = WallpaperJob::new(output);
    for input in inputs {
        if job.inputs.contains_key(&input.index) {
            return Err(WallcompError::usage(format!(
                "monitor {} was given more than one input file",
                input.index
            )));
        }
        job = job.with_input(input.index, input.path);
    }
    Ok(job)
}
