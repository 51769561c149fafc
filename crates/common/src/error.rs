//! Error types shared across wallcomp crates.

use std::path::PathBuf;

/// Top-level error type for wallcomp operations.
#[derive(Debug, thiserror::Error)]
pub enum WallcompError {
    #[error("EnumDisplayMonitors() failed with platform error code {code}")]
    Enumeration { code: u32 },

    #[error("GetMonitorInfoW() failed for monitor {index} with platform error code {code}")]
    MonitorInfo { index: usize, code: u32 },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error("No monitors were found; cannot compose an empty virtual desktop")]
    NoMonitors,

    #[error("Virtual desktop of {width}x{height} pixels is too large for an in-memory canvas")]
    CanvasTooLarge { width: u32, height: u32 },

    #[error("Specified {inputs} input wallpaper file paths, but only {monitors} monitors were found")]
    TooManyInputs { inputs: usize, monitors: usize },

    #[error("Input targets monitor {index}, but only {count} monitors were found")]
    MonitorIndexOutOfRange { index: usize, count: usize },

    #[error(
        "Image {image_index} ({path:?}) dimensions {image_width}x{image_height} do not match \
         monitor {monitor_index} ({monitor_name:?}) dimensions {monitor_width}x{monitor_height}"
    )]
    DimensionMismatch {
        image_index: usize,
        path: PathBuf,
        image_width: u32,
        image_height: u32,
        monitor_index: usize,
        monitor_name: String,
        monitor_width: u32,
        monitor_height: u32,
    },

    #[error("Could not open file {path:?} for reading: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not open file {path:?} for writing: {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode image from file {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Could not encode image in file {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid monitor layout {path:?}: {message}")]
    Layout { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Incorrect usage: {message}")]
    Usage { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using WallcompError.
pub type WallcompResult<T> = Result<T, WallcompError>;

impl WallcompError {
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage {
            message: msg.into(),
        }
    }

    pub fn layout(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Layout {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Whether this error came from querying the operating system for
    /// monitor geometry.
    pub fn is_enumeration_failure(&self) -> bool {
        matches!(
            self,
            Self::Enumeration { .. } | Self::MonitorInfo { .. } | Self::Unsupported { .. }
        )
    }
}
