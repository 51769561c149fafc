//! List detected monitors.

use std::io::{self, Write};

use wallcomp_platform_core::{compute_bounds, Monitor, MonitorSource};

pub fn run(source: &dyn MonitorSource) -> anyhow::Result<()> {
    let monitors = source.enumerate()?;
    println!("Monitors ({}):", source.describe());
    for line in monitor_lines(&monitors) {
        println!("{line}");
    }

    let bounds = compute_bounds(&monitors);
    if !bounds.is_degenerate() {
        println!();
        println!(
            "Virtual desktop: ({}, {}) to ({}, {}), {}x{}",
            bounds.x_min,
            bounds.y_min,
            bounds.x_max,
            bounds.y_max,
            bounds.width(),
            bounds.height()
        );
    }
    Ok(())
}

/// Write the live monitor list after a usage error.
pub fn write_for_usage(source: &dyn MonitorSource, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "List of monitors:")?;
    match source.enumerate() {
        Ok(monitors) if monitors.is_empty() => writeln!(out, "  (none found)"),
        Ok(monitors) => monitor_lines(&monitors)
            .into_iter()
            .try_for_each(|line| writeln!(out, "{line}")),
        Err(e) => writeln!(out, "  (could not enumerate monitors: {e})"),
    }
}

pub fn monitor_lines(monitors: &[Monitor]) -> Vec<String> {
    monitors
        .iter()
        .enumerate()
        .map(|(i, m)| {
            format!(
                "  Monitor {i} ({:?}) at ({}, {}) has dimensions {}x{}{}",
                m.name,
                m.x,
                m.y,
                m.width,
                m.height,
                if m.primary { " (primary)" } else { "" }
            )
        })
        .collect()
}
