//! Windows platform integration.
//!
//! - **Monitor enumeration:** `EnumDisplayMonitors` + `GetMonitorInfoW`,
//!   collected into a fixed-capacity buffer
//! - **DPI awareness:** per-monitor v2 opt-in so geometry is reported in
//!   physical pixels
//!
//! On other targets the enumerator reports [`WallcompError::Unsupported`]
//! and the DPI request is [`DpiAwareness::NotApplicable`].

pub mod collector;
#[cfg(windows)]
mod win32;

pub use collector::{decode_device_name, MonitorCollector};

use wallcomp_common::error::WallcompResult;
#[cfg(not(windows))]
use wallcomp_common::error::WallcompError;
use wallcomp_platform_core::{DpiAwareness, Monitor, MonitorSource};

/// Monitor source backed by the live Win32 display configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Monitors;

impl Win32Monitors {
    pub fn new() -> Self {
        Self
    }
}

impl MonitorSource for Win32Monitors {
    fn enumerate(&self) -> WallcompResult<Vec<Monitor>> {
        detect_monitors()
    }

    fn describe(&self) -> String {
        "Win32 display enumeration".to_string()
    }
}

/// Detect monitors on Windows, in enumeration order.
pub fn detect_monitors() -> WallcompResult<Vec<Monitor>> {
    #[cfg(windows)]
    {
        win32::enumerate_monitors()
    }
    #[cfg(not(windows))]
    {
        Err(WallcompError::unsupported(
            "native monitor enumeration is only available on Windows; pass --layout <FILE>",
        ))
    }
}

/// Ask the OS to report monitor geometry in physical pixels.
///
/// Must run before the first geometry query. Failure is not fatal; the
/// caller decides how loudly to report it.
pub fn enable_dpi_awareness() -> DpiAwareness {
    #[cfg(windows)]
    {
        win32::set_per_monitor_dpi_awareness()
    }
    #[cfg(not(windows))]
    {
        DpiAwareness::NotApplicable
    }
}
