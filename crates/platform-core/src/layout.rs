//! Fixed monitor layouts loaded from JSON.
//!
//! A fixed layout stands in for OS enumeration, either on hosts without a
//! native backend or when the operator wants to compose for a layout other
//! than the one currently attached.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wallcomp_common::error::{WallcompError, WallcompResult};

use crate::{Monitor, MonitorSource, MAX_MONITORS};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayoutFile {
    monitors: Vec<Monitor>,
}

/// A monitor set read from a layout file.
#[derive(Debug, Clone)]
pub struct FixedLayout {
    source: PathBuf,
    monitors: Vec<Monitor>,
}

impl FixedLayout {
    /// Read and validate a layout file.
    pub fn from_file(path: &Path) -> WallcompResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| WallcompError::layout(path, format!("failed to read: {e}")))?;
        Self::parse(path.to_path_buf(), &content)
    }

    /// Parse a layout from a JSON string.
    pub fn from_json(json: &str) -> WallcompResult<Self> {
        Self::parse(PathBuf::from("<inline>"), json)
    }

    fn parse(source: PathBuf, json: &str) -> WallcompResult<Self> {
        let file: LayoutFile = serde_json::from_str(json)
            .map_err(|e| WallcompError::layout(&source, e.to_string()))?;

        if file.monitors.len() > MAX_MONITORS {
            return Err(WallcompError::layout(
                &source,
                format!(
                    "{} monitors listed, at most {MAX_MONITORS} are supported",
                    file.monitors.len()
                ),
            ));
        }
        if let Some((i, m)) = file
            .monitors
            .iter()
            .enumerate()
            .find(|(_, m)| m.width == 0 || m.height == 0)
        {
            return Err(WallcompError::layout(
                &source,
                format!(
                    "monitor {i} ({:?}) has zero-sized dimensions {}x{}",
                    m.name, m.width, m.height
                ),
            ));
        }

        if let Some((i, m)) = file
            .monitors
            .iter()
            .enumerate()
            .find(|(_, m)| m.checked_edges().is_none())
        {
            return Err(WallcompError::layout(
                &source,
                format!(
                    "monitor {i} ({:?}) at ({}, {}) with dimensions {}x{} extends past the \
                     coordinate range",
                    m.name, m.x, m.y, m.width, m.height
                ),
            ));
        }

        tracing::debug!(
            source = %source.display(),
            count = file.monitors.len(),
            "Loaded fixed monitor layout"
        );
        Ok(Self {
            source,
            monitors: file.monitors,
        })
    }

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }
}

impl MonitorSource for FixedLayout {
    fn enumerate(&self) -> WallcompResult<Vec<Monitor>> {
        Ok(self.monitors.clone())
    }

    fn describe(&self) -> String {
        format!("fixed layout {}", self.source.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_MONITORS: &str = r#"{
        "monitors": [
            { "name": "DISPLAY1", "x": -50, "y": 0, "width": 50, "height": 50 },
            { "name": "DISPLAY2", "x": 0, "y": 0, "width": 50, "height": 50, "primary": true }
        ]
    }"#;

    #[test]
    fn parses_monitors_in_file_order() {
        let layout = FixedLayout::from_json(TWO_MONITORS).unwrap();
        let monitors = layout.enumerate().unwrap();
        assert_eq!(monitors.len(), 2);
        assert_eq!(monitors[0].name, "DISPLAY1");
        assert_eq!(monitors[0].x, -50);
        assert!(!monitors[0].primary);
        assert!(monitors[1].primary);
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.json");
        std::fs::write(&path, TWO_MONITORS).unwrap();

        let layout = FixedLayout::from_file(&path).unwrap();
        assert_eq!(layout.monitors().len(), 2);
        assert!(layout.describe().contains("desk.json"));
    }

    #[test]
    fn rejects_zero_sized_monitor() {
        let json = r#"{ "monitors": [ { "name": "bad", "x": 0, "y": 0, "width": 0, "height": 10 } ] }"#;
        let err = FixedLayout::from_json(json).unwrap_err();
        assert!(matches!(err, WallcompError::Layout { .. }));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn rejects_more_than_cap() {
        let monitors: Vec<Monitor> = (0..=MAX_MONITORS as i32)
            .map(|i| Monitor::new(format!("m{i}"), i * 10, 0, 10, 10))
            .collect();
        let json = serde_json::to_string(&LayoutFile { monitors }).unwrap();
        assert!(matches!(
            FixedLayout::from_json(&json),
            Err(WallcompError::Layout { .. })
        ));
    }

    #[test]
    fn rejects_monitor_edges_past_coordinate_range() {
        let wide = r#"{ "monitors": [ { "name": "wide", "x": 0, "y": 0, "width": 3000000000, "height": 10 } ] }"#;
        let err = FixedLayout::from_json(wide).unwrap_err();
        assert!(matches!(err, WallcompError::Layout { .. }));
        assert!(err.to_string().contains("wide"));

        let low = r#"{ "monitors": [ { "name": "low", "x": 0, "y": 2147483600, "width": 10, "height": 100 } ] }"#;
        assert!(matches!(
            FixedLayout::from_json(low),
            Err(WallcompError::Layout { .. })
        ));
    }

    #[test]
    fn accepts_monitors_touching_coordinate_limits() {
        let json = r#"{ "monitors": [
            { "name": "min", "x": -2147483648, "y": -2147483648, "width": 1, "height": 1 },
            { "name": "max", "x": 2147483646, "y": 2147483646, "width": 1, "height": 1 }
        ] }"#;
        assert_eq!(FixedLayout::from_json(json).unwrap().monitors().len(), 2);
    }

    #[test]
    fn missing_file_is_layout_error() {
        let err = FixedLayout::from_file(Path::new("/nonexistent/desk.json")).unwrap_err();
        assert!(matches!(err, WallcompError::Layout { .. }));
    }
}
