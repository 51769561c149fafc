use std::mem;
use std::ptr;

use wallcomp_common::error::{WallcompError, WallcompResult};
use wallcomp_platform_core::{DpiAwareness, Monitor, MAX_MONITORS};
use windows::Win32::Foundation::{GetLastError, BOOL, FALSE, LPARAM, RECT, TRUE};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
    MONITORINFOF_PRIMARY,
};
use windows::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};

use crate::collector::{decode_device_name, MonitorCollector};

/// State shared with the enumeration callback through `LPARAM`.
struct EnumState {
    collector: MonitorCollector,
    /// Enumeration index and error code of a failed `GetMonitorInfoW`.
    info_failure: Option<(usize, u32)>,
}

unsafe extern "system" fn monitor_enum_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _rect: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is the `&mut EnumState` passed to EnumDisplayMonitors
    // below, which outlives the synchronous enumeration.
    let state = unsafe { &mut *(lparam.0 as *mut EnumState) };

    let mut info = MONITORINFOEXW::default();
    info.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;

    // SAFETY: MONITORINFOEXW starts with MONITORINFO and cbSize advertises
    // the extended layout.
    let ok = unsafe { GetMonitorInfoW(hmonitor, ptr::addr_of_mut!(info).cast::<MONITORINFO>()) };
    if !ok.as_bool() {
        let code = unsafe { GetLastError() }.0;
        state.info_failure = Some((state.collector.len(), code));
        return FALSE;
    }

    let rc = info.monitorInfo.rcMonitor;
    let monitor = Monitor {
        name: decode_device_name(&info.szDevice),
        x: rc.left,
        y: rc.top,
        width: rc.right.saturating_sub(rc.left).max(0) as u32,
        height: rc.bottom.saturating_sub(rc.top).max(0) as u32,
        primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
    };

    if state.collector.push(monitor).is_continue() {
        TRUE
    } else {
        FALSE
    }
}

pub(crate) fn enumerate_monitors() -> WallcompResult<Vec<Monitor>> {
    let mut state = EnumState {
        collector: MonitorCollector::with_capacity(MAX_MONITORS),
        info_failure: None,
    };

    // SAFETY: the callback only touches `state` for the duration of this
    // call.
    let ok = unsafe {
        EnumDisplayMonitors(
            HDC::default(),
            None,
            Some(monitor_enum_proc),
            LPARAM(ptr::addr_of_mut!(state) as isize),
        )
    };

    if let Some((index, code)) = state.info_failure {
        return Err(WallcompError::MonitorInfo { index, code });
    }
    if state.collector.is_full() {
        tracing::warn!(
            cap = MAX_MONITORS,
            "Monitor enumeration stopped at the monitor cap; further monitors are ignored"
        );
    } else if !ok.as_bool() {
        let code = unsafe { GetLastError() }.0;
        return Err(WallcompError::Enumeration { code });
    }
    if state.collector.is_empty() {
        tracing::warn!("EnumDisplayMonitors() succeeded but reported no monitors");
    }

    let monitors = state.collector.into_monitors();
    tracing::debug!(count = monitors.len(), "Enumerated monitors");
    Ok(monitors)
}

pub(crate) fn set_per_monitor_dpi_awareness() -> DpiAwareness {
    // SAFETY: process-wide setting with no pointer arguments.
    match unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) } {
        Ok(()) => DpiAwareness::PerMonitorV2,
        Err(e) => DpiAwareness::Unaware {
            reason: e.to_string(),
        },
    }
}
