//! Source page decoding.
//!
//! Pages are read with the `image` crate and flattened to 8-bit RGB before
//! they reach the WebP encoder. Alpha, extra channels and bit depth beyond
//! 8 bits are discarded.

use crate::error::{Error, Result};
use image::{DynamicImage, ImageReader};
use imgref::ImgVec;
use rgb::RGB8;
use std::path::Path;

/// Open, decode and flatten one source page to RGB.
///
/// The container format is sniffed from the file contents and falls back to
/// the file extension, so a PNG saved as `.jpg` still decodes.
///
/// # Example
///
/// ```rust,no_run
/// let page = pageshrink::load_rgb("raw_pages/001.png")?;
/// println!("{}x{}", page.width(), page.height());
/// # Ok::<(), pageshrink::Error>(())
/// ```
pub fn load_rgb(path: impl AsRef<Path>) -> Result<ImgVec<RGB8>> {
    let path = path.as_ref();

    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| Error::io(path, e))?;

    let image = reader.decode().map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(to_rgb(&image))
}

/// Flatten any decoded color mode (gray, gray+alpha, RGBA, 16-bit, float)
/// to packed 8-bit RGB.
pub fn to_rgb(image: &DynamicImage) -> ImgVec<RGB8> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    let pixels: Vec<RGB8> = rgb
        .as_raw()
        .chunks_exact(3)
        .map(|p| RGB8::new(p[0], p[1], p[2]))
        .collect();

    ImgVec::new(pixels, width as usize, height as usize)
}
