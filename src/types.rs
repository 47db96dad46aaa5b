//! Core types: accepted source formats, output naming and WebP header info.

use crate::error::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Source image formats picked up from the input directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceFormat {
    /// `.png`
    Png,
    /// `.jpg` or `.jpeg`
    Jpeg,
}

impl SourceFormat {
    /// Every accepted file name suffix, lowercase and with the leading dot.
    pub const fn extensions() -> &'static [&'static str] {
        &[".png", ".jpg", ".jpeg"]
    }

    /// Classify a directory entry name by its suffix, ignoring ASCII case.
    ///
    /// The check is a plain suffix test on the name, so `.png` on its own
    /// matches while `png` or `page.png.bak` do not.
    ///
    /// ```rust
    /// use pageshrink::SourceFormat;
    /// use std::ffi::OsStr;
    ///
    /// assert_eq!(SourceFormat::from_file_name(OsStr::new("b.JPG")), Some(SourceFormat::Jpeg));
    /// assert_eq!(SourceFormat::from_file_name(OsStr::new("notes.txt")), None);
    /// ```
    pub fn from_file_name(name: &OsStr) -> Option<Self> {
        let name = name.to_string_lossy().to_ascii_lowercase();
        if name.ends_with(".png") {
            Some(SourceFormat::Png)
        } else if name.ends_with(".jpg") || name.ends_with(".jpeg") {
            Some(SourceFormat::Jpeg)
        } else {
            None
        }
    }
}

/// Output name for a source page: the final extension swapped for `.webp`.
///
/// Dots inside the base name survive, so `scan.v2.png` becomes `scan.v2.webp`.
pub fn webp_file_name(name: &OsStr) -> OsString {
    Path::new(name).with_extension("webp").into_os_string()
}

/// Information about an encoded WebP image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebpInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Whether the image has an alpha channel.
    pub has_alpha: bool,
    /// Bitstream format (lossy or lossless).
    pub format: BitstreamFormat,
}

impl WebpInfo {
    /// Get info from WebP data without decoding.
    pub fn from_webp(data: &[u8]) -> Result<Self> {
        let mut width: i32 = 0;
        let mut height: i32 = 0;

        let result =
            unsafe { libwebp_sys::WebPGetInfo(data.as_ptr(), data.len(), &mut width, &mut height) };

        if result == 0 {
            return Err(Error::InvalidInput("not a WebP image".into()));
        }

        let mut features = core::mem::MaybeUninit::<libwebp_sys::WebPBitstreamFeatures>::uninit();
        let status = unsafe {
            libwebp_sys::WebPGetFeatures(data.as_ptr(), data.len(), features.as_mut_ptr())
        };

        if status != libwebp_sys::VP8StatusCode::VP8_STATUS_OK {
            return Err(Error::InvalidInput(format!(
                "unreadable WebP header (status {})",
                status as i32
            )));
        }
        let features = unsafe { features.assume_init() };

        let format = match features.format {
            1 => BitstreamFormat::Lossy,
            2 => BitstreamFormat::Lossless,
            _ => BitstreamFormat::Undefined,
        };

        Ok(WebpInfo {
            width: width as u32,
            height: height as u32,
            has_alpha: features.has_alpha != 0,
            format,
        })
    }
}

/// Bitstream format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum BitstreamFormat {
    /// Format not determined (mixed or animated).
    #[default]
    Undefined,
    /// Lossy compression (VP8).
    Lossy,
    /// Lossless compression (VP8L).
    Lossless,
}
