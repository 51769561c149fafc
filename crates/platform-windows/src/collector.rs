//! Fixed-capacity monitor collection and device-name decoding.
//!
//! The native enumeration callback must not grow buffers or read past
//! fixed-width fields, so both concerns live here as safe, testable code.

use std::ops::ControlFlow;

use wallcomp_platform_core::Monitor;

/// Collects monitors reported by a native callback into a buffer that is
/// allocated once, up front.
#[derive(Debug)]
pub struct MonitorCollector {
    monitors: Vec<Monitor>,
    capacity: usize,
}

impl MonitorCollector {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a monitor. Returns `Break` once the buffer is full so the
    /// caller can tell the OS to stop enumerating.
    pub fn push(&mut self, monitor: Monitor) -> ControlFlow<()> {
        if self.is_full() {
            return ControlFlow::Break(());
        }
        self.monitors.push(monitor);
        if self.is_full() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// True once the cap has been reached; any further monitors were not
    /// collected.
    pub fn is_full(&self) -> bool {
        self.monitors.len() >= self.capacity
    }

    pub fn into_monitors(self) -> Vec<Monitor> {
        self.monitors
    }
}

/// Decode a fixed-width, NUL-terminated UTF-16 device name.
///
/// Stops at the first NUL or at the end of the buffer, whichever comes
/// first. Unpaired surrogates become U+FFFD.
pub fn decode_device_name(raw: &[u16]) -> String {
    let end = raw.iter().position(|&c| c == 0).unwrap_or(raw.len());
    String::from_utf16_lossy(&raw[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallcomp_platform_core::MAX_MONITORS;

    fn wide<const N: usize>(s: &str) -> [u16; N] {
        let mut buf = [0u16; N];
        for (slot, unit) in buf.iter_mut().zip(s.encode_utf16()) {
            *slot = unit;
        }
        buf
    }

    #[test]
    fn decodes_terminated_name() {
        let raw: [u16; 32] = wide(r"\\.\DISPLAY1");
        assert_eq!(decode_device_name(&raw), r"\\.\DISPLAY1");
    }

    #[test]
    fn stops_at_first_embedded_terminator() {
        let mut raw: [u16; 32] = wide("DISPLAY2");
        raw[4] = 0;
        assert_eq!(decode_device_name(&raw), "DISP");
    }

    #[test]
    fn unterminated_buffer_is_bounded_by_width() {
        let raw: [u16; 8] = wide("ABCDEFGHIJKL");
        assert_eq!(decode_device_name(&raw), "ABCDEFGH");
    }

    #[test]
    fn invalid_utf16_is_replaced() {
        let raw = [0x0041, 0xD800, 0x0042, 0];
        assert_eq!(decode_device_name(&raw), "A\u{FFFD}B");
    }

    #[test]
    fn collector_stops_at_cap() {
        let mut collector = MonitorCollector::with_capacity(2);
        assert!(collector
            .push(Monitor::new("a", 0, 0, 10, 10))
            .is_continue());
        assert!(collector.push(Monitor::new("b", 10, 0, 10, 10)).is_break());
        assert!(collector.is_full());
        assert!(collector.push(Monitor::new("c", 20, 0, 10, 10)).is_break());

        let monitors = collector.into_monitors();
        assert_eq!(monitors.len(), 2);
        assert_eq!(monitors[1].name, "b");
    }

    #[test]
    fn default_cap_is_256_without_reallocation() {
        let mut collector = MonitorCollector::with_capacity(MAX_MONITORS);
        assert!(collector.is_empty());
        let initial = collector.monitors.capacity();
        assert!(initial >= MAX_MONITORS);
        let mut pushed = 0;
        while collector
            .push(Monitor::new("m", pushed, 0, 1, 1))
            .is_continue()
        {
            pushed += 1;
        }
        assert_eq!(collector.len(), MAX_MONITORS);
        assert_eq!(collector.monitors.capacity(), initial);
    }
}
