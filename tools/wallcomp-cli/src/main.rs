//! wallcomp CLI: compose one virtual desktop wallpaper from per-monitor images.
//!
//! Usage:
//!   wallcomp -i 0=left.png -i 1=right.jpg -o wallpaper.png
//!   wallcomp -i0 left.png -i1 right.jpg -o wallpaper.jpg
//!   wallcomp --list-monitors

use std::path::PathBuf;

use clap::Parser;
use wallcomp_common::config::{AppConfig, MonitorConfig};
use wallcomp_common::error::WallcompResult;
use wallcomp_platform_core::{DpiAwareness, FixedLayout, MonitorSource};
use wallcomp_platform_windows::Win32Monitors;

mod args;
mod commands;

use args::InputArg;
use commands::compile::USAGE;

#[derive(Parser)]
#[command(
    name = "wallcomp",
    about = "Compose a multi-monitor wallpaper from one image per monitor",
    version,
    author,
    override_usage = USAGE
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Wallpaper for one monitor as INDEX=PATH (repeatable)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "INDEX=PATH",
        value_parser = args::parse_input
    )]
    inputs: Vec<InputArg>,

    /// Output file path (.png, .jpg or .jpeg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Monitor layout JSON file used instead of querying the OS
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Configuration file (defaults to the standard location)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the detected monitors and exit
    #[arg(short, long)]
    list_monitors: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(args::normalize_indexed_flags(std::env::args_os()));

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if cli.layout.is_some() {
        config.monitors.layout_file = cli.layout.clone();
    }
    wallcomp_common::logging::init_logging(&config.logging);

    if config.monitors.dpi_awareness {
        match wallcomp_platform_windows::enable_dpi_awareness() {
            DpiAwareness::Unaware { reason } => tracing::warn!(
                "SetProcessDpiAwarenessContext() failed; detected monitor resolutions might be \
                 incorrect if DPI scaling is being used: {reason}"
            ),
            awareness => tracing::debug!(?awareness, "DPI awareness"),
        }
    }

    let source = monitor_source(&config.monitors)?;
    tracing::debug!(source = %source.describe(), "Using monitor source");

    if cli.list_monitors {
        return commands::monitors::run(source.as_ref());
    }

    let job = commands::compile::plan(
        source.as_ref(),
        cli.output,
        cli.inputs,
        &mut std::io::stderr().lock(),
    )?;
    commands::compile::run(source.as_ref(), &job)
}

fn monitor_source(config: &MonitorConfig) -> WallcompResult<Box<dyn MonitorSource>> {
    Ok(match &config.layout_file {
        Some(path) => Box::new(FixedLayout::from_file(path)?),
        None => Box::new(Win32Monitors::new()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> Cli {
        Cli::try_parse_from(args::normalize_indexed_flags(
            argv.iter().map(std::ffi::OsString::from),
        ))
        .unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn accepts_indexed_and_assignment_forms() {
        let cli = parse(&["wallcomp", "-i0", "a.png", "--input", "2=c.jpg", "-o", "out.png"]);
        assert_eq!(cli.output, Some(PathBuf::from("out.png")));
        assert_eq!(
            cli.inputs
                .iter()
                .map(|i| (i.index, i.path.clone()))
                .collect::<Vec<_>>(),
            vec![(0, PathBuf::from("a.png")), (2, PathBuf::from("c.jpg"))]
        );
    }

    #[test]
    fn output_and_inputs_are_optional_at_parse_time() {
        let cli = parse(&["wallcomp", "--layout", "desk.json"]);
        assert!(cli.output.is_none());
        assert!(cli.inputs.is_empty());
        assert_eq!(cli.layout, Some(PathBuf::from("desk.json")));
    }

    #[test]
    fn out_of_range_index_is_rejected_by_parser() {
        let result = Cli::try_parse_from(args::normalize_indexed_flags(
            ["wallcomp", "-i300", "a.png", "-o", "out.png"]
                .iter()
                .map(std::ffi::OsString::from),
        ));
        assert!(result.is_err());
    }
}
