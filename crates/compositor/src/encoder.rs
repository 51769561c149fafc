//! Output format selection and encoding.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageError, ImageResult};
use wallcomp_common::error::{WallcompError, WallcompResult};

use crate::canvas::Canvas;

/// JPEG output is never degraded below maximum quality.
pub const JPEG_QUALITY: u8 = 100;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless; keeps alpha and 16-bit depth.
    Png,
    /// Lossy at [`JPEG_QUALITY`]; alpha is dropped.
    Jpeg,
}

impl OutputFormat {
    /// Format implied by the path's extension, ignoring case.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Like [`OutputFormat::from_extension`], but falls back to PNG with a
    /// warning instead of failing.
    pub fn for_path(path: &Path) -> Self {
        Self::from_extension(path).unwrap_or_else(|| {
            tracing::warn!(
                path = %path.display(),
                "Could not determine image format from the output file extension; defaulting to PNG. \
                 Supported extensions are .png (PNG), .jpeg (JPEG) and .jpg (JPEG)"
            );
            Self::Png
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
        }
    }
}

/// Encode `canvas` to `path`, choosing the format from the extension.
///
/// Any existing file is truncated. Returns the format that was written.
pub fn encode(canvas: Canvas, path: &Path) -> WallcompResult<OutputFormat> {
    let format = OutputFormat::for_path(path);
    encode_as(canvas, path, format)?;
    Ok(format)
}

/// Encode `canvas` to `path` in an explicit format.
pub fn encode_as(canvas: Canvas, path: &Path, format: OutputFormat) -> WallcompResult<()> {
    let image = canvas.into_image();
    let encode_err = |source: ImageError| WallcompError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|source| WallcompError::FileCreate {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_image(&image, format, &mut writer).map_err(encode_err)?;

    // Flushing pushes every encoded byte to the OS; failure here loses data.
    let file = writer
        .into_inner()
        .map_err(|e| encode_err(ImageError::IoError(e.into_error())))?;

    // The bytes are already written, so a failing sync or close only
    // warrants a warning.
    if let Err(e) = file.sync_all() {
        tracing::warn!(path = %path.display(), "Error closing handle to output file: {e}");
    }
    drop(file);

    tracing::info!(
        path = %path.display(),
        format = format.name(),
        width = image.width(),
        height = image.height(),
        "Wrote wallpaper"
    );
    Ok(())
}

fn write_image<W: Write>(
    image: &DynamicImage,
    format: OutputFormat,
    writer: &mut W,
) -> ImageResult<()> {
    match format {
        OutputFormat::Png => image.write_with_encoder(PngEncoder::new(writer)),
        OutputFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(writer, JPEG_QUALITY)),
    }
}
