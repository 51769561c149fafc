//! Virtual desktop canvas and composition.
//!
//! The canvas is addressed in world (virtual-desktop) coordinates: the
//! pixel at canvas-local `(0, 0)` is world `(x_min, y_min)`, so monitors
//! left of or above the primary origin still land on valid indices.

use image::{imageops, DynamicImage, ImageBuffer, Rgba, RgbaImage};
use wallcomp_common::error::{WallcompError, WallcompResult};
use wallcomp_platform_core::{find_overlaps, Monitor, VirtualDesktopBounds};

use crate::loader::ValidatedImage;

type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Bits per channel held by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChannelDepth {
    Eight,
    Sixteen,
}

impl ChannelDepth {
    /// The narrowest depth that holds `image` without quantizing it.
    pub fn of(image: &DynamicImage) -> Self {
        let color = image.color();
        if color.bytes_per_pixel() / color.channel_count() > 1 {
            Self::Sixteen
        } else {
            Self::Eight
        }
    }

    /// Bytes per RGBA pixel at this depth.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Eight => 4,
            Self::Sixteen => 8,
        }
    }
}

#[derive(Debug, Clone)]
enum Pixels {
    Rgba8(RgbaImage),
    Rgba16(Rgba16Image),
}

/// The composed wallpaper raster.
#[derive(Debug, Clone)]
pub struct Canvas {
    bounds: VirtualDesktopBounds,
    pixels: Pixels,
}

impl Canvas {
    /// Size in bytes of a canvas covering `bounds`, or `CanvasTooLarge` when
    /// it cannot be addressed on this host.
    pub fn required_bytes(
        bounds: VirtualDesktopBounds,
        depth: ChannelDepth,
    ) -> WallcompResult<usize> {
        if bounds.is_degenerate() {
            return Err(WallcompError::NoMonitors);
        }
        let (width, height) = (bounds.width(), bounds.height());
        usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .and_then(|n| n.checked_mul(depth.bytes_per_pixel()))
            .filter(|&n| n <= isize::MAX as usize)
            .ok_or(WallcompError::CanvasTooLarge { width, height })
    }

    /// Allocate a zero-filled (transparent black) canvas covering `bounds`.
    pub fn allocate(bounds: VirtualDesktopBounds, depth: ChannelDepth) -> WallcompResult<Self> {
        Self::required_bytes(bounds, depth)?;
        let (w, h) = (bounds.width(), bounds.height());
        let pixels = match depth {
            ChannelDepth::Eight => Pixels::Rgba8(RgbaImage::new(w, h)),
            ChannelDepth::Sixteen => Pixels::Rgba16(Rgba16Image::new(w, h)),
        };
        Ok(Self { bounds, pixels })
    }

    pub fn bounds(&self) -> VirtualDesktopBounds {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    pub fn depth(&self) -> ChannelDepth {
        match self.pixels {
            Pixels::Rgba8(_) => ChannelDepth::Eight,
            Pixels::Rgba16(_) => ChannelDepth::Sixteen,
        }
    }

    /// Copy `source` into the region occupied by `monitor`.
    ///
    /// The source is read from its own top-left corner. Pixels that would
    /// fall outside the canvas are dropped; for a monitor taken from the
    /// same layout as the bounds that never happens.
    pub fn blit(&mut self, monitor: &Monitor, source: &DynamicImage) {
        let dx = i64::from(monitor.x) - i64::from(self.bounds.x_min);
        let dy = i64::from(monitor.y) - i64::from(self.bounds.y_min);
        match &mut self.pixels {
            Pixels::Rgba8(buf) => imageops::replace(buf, &source.to_rgba8(), dx, dy),
            Pixels::Rgba16(buf) => imageops::replace(buf, &source.to_rgba16(), dx, dy),
        }
    }

    /// Pixel at world coordinates, narrowed to 8 bits per channel.
    pub fn world_pixel(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        let lx = u32::try_from(i64::from(x) - i64::from(self.bounds.x_min)).ok()?;
        let ly = u32::try_from(i64::from(y) - i64::from(self.bounds.y_min)).ok()?;
        match &self.pixels {
            Pixels::Rgba8(buf) => buf.get_pixel_checked(lx, ly).copied(),
            Pixels::Rgba16(buf) => buf
                .get_pixel_checked(lx, ly)
                .map(|p| Rgba(p.0.map(|c| ((u32::from(c) + 128) / 257) as u8))),
        }
    }

    /// Hand the raster over for encoding.
    pub fn into_image(self) -> DynamicImage {
        match self.pixels {
            Pixels::Rgba8(buf) => DynamicImage::ImageRgba8(buf),
            Pixels::Rgba16(buf) => DynamicImage::ImageRgba16(buf),
        }
    }
}

/// Build a canvas for `bounds` and copy every assignment into it.
///
/// Assignments on non-overlapping monitors commute. When two assigned
/// monitors overlap, the later assignment wins and a warning is logged.
pub fn compose(
    bounds: VirtualDesktopBounds,
    assignments: &[ValidatedImage],
) -> WallcompResult<Canvas> {
    let depth = assignments
        .iter()
        .map(|a| ChannelDepth::of(a.image()))
        .max()
        .unwrap_or(ChannelDepth::Eight);
    let mut canvas = Canvas::allocate(bounds, depth)?;

    let assigned: Vec<Monitor> = assignments.iter().map(|a| a.monitor().clone()).collect();
    for (a, b) in find_overlaps(&assigned) {
        tracing::warn!(
            first = assignments[a].monitor_index(),
            second = assignments[b].monitor_index(),
            "Monitors overlap; the later image overwrites the shared region"
        );
    }

    tracing::debug!(
        width = canvas.width(),
        height = canvas.height(),
        depth = ?depth,
        "Allocated canvas"
    );

    for assignment in assignments {
        canvas.blit(assignment.monitor(), assignment.image());
        tracing::debug!(
            monitor = assignment.monitor_index(),
            path = %assignment.path().display(),
            "Placed image"
        );
    }

    Ok(canvas)
}
