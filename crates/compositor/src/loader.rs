//! Input image decoding and dimension validation.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageReader};
use wallcomp_common::error::{WallcompError, WallcompResult};
use wallcomp_platform_core::Monitor;

/// An image whose size is known to match the monitor it targets.
///
/// The only way to obtain one is through validation, so the compositor can
/// trust every value it receives.
#[derive(Debug, Clone)]
pub struct ValidatedImage {
    monitor_index: usize,
    monitor: Monitor,
    path: PathBuf,
    image: DynamicImage,
}

impl ValidatedImage {
    /// Pair an already decoded image with its monitor, rejecting any size
    /// mismatch.
    pub fn new(
        monitor_index: usize,
        monitor: Monitor,
        path: impl Into<PathBuf>,
        image: DynamicImage,
    ) -> WallcompResult<Self> {
        let path = path.into();
        if image.width() != monitor.width || image.height() != monitor.height {
            return Err(WallcompError::DimensionMismatch {
                image_index: monitor_index,
                path,
                image_width: image.width(),
                image_height: image.height(),
                monitor_index,
                monitor_name: monitor.name.clone(),
                monitor_width: monitor.width,
                monitor_height: monitor.height,
            });
        }
        Ok(Self {
            monitor_index,
            monitor,
            path,
            image,
        })
    }

    pub fn monitor_index(&self) -> usize {
        self.monitor_index
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Decode the image at `path` and check it against `monitor`.
pub fn load_and_validate(
    path: &Path,
    monitor_index: usize,
    monitor: &Monitor,
) -> WallcompResult<ValidatedImage> {
    let image = decode_file(path)?;
    tracing::debug!(
        path = %path.display(),
        monitor = monitor_index,
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "Decoded input image"
    );
    ValidatedImage::new(monitor_index, monitor.clone(), path, image)
}

/// Decode a file using its content, not its extension, to pick the codec.
fn decode_file(path: &Path) -> WallcompResult<DynamicImage> {
    let file = File::open(path).map_err(|source| WallcompError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let decode_err = |source: ImageError| WallcompError::Decode {
        path: path.to_path_buf(),
        source,
    };

    // The reader owns the handle and drops it as soon as decoding returns.
    ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)
}
