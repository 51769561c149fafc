//! wallcomp Compositor
//!
//! Turns a monitor layout plus per-monitor images into one wallpaper file:
//! - **Loader:** decode by content sniffing and validate against the
//!   target monitor's size
//! - **Canvas:** a virtual-desktop-sized raster addressed in world
//!   coordinates
//! - **Encoder:** PNG or JPEG chosen from the output extension
//! - **Job:** the end-to-end pipeline

pub mod canvas;
pub mod encoder;
pub mod job;
pub mod loader;

pub use canvas::{compose, Canvas, ChannelDepth};
pub use encoder::{encode, OutputFormat};
pub use job::{compile_wallpaper, CompileReport, WallpaperJob};
pub use loader::{load_and_validate, ValidatedImage};
