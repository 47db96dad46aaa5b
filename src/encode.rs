//! Lossy WebP encoding of RGB pages.

use crate::config::EncoderConfig;
use crate::error::{EncodingError, Error, Result};
use imgref::ImgRef;
use rgb::RGB8;

/// Largest width or height libwebp accepts.
pub const MAX_DIMENSION: u32 = 16383;

/// Encode RGB rows to WebP (called by [`EncoderConfig::encode_rgb`] and [`Encoder`]).
///
/// `stride` is the distance between row starts in bytes; the last row only
/// needs `width * 3` bytes.
pub(crate) fn encode_with_config(
    data: &[u8],
    width: u32,
    height: u32,
    stride: usize,
    config: &EncoderConfig,
) -> Result<Vec<u8>> {
    validate_dimensions(width, height)?;
    validate_buffer_size(data.len(), width, height, stride)?;

    let webp_config = config.to_libwebp()?;

    let mut picture = libwebp_sys::WebPPicture::new()
        .map_err(|_| Error::InvalidConfig("failed to init picture".into()))?;

    picture.width = width as i32;
    picture.height = height as i32;
    picture.use_argb = 1;

    let import_ok =
        unsafe { libwebp_sys::WebPPictureImportRGB(&mut picture, data.as_ptr(), stride as i32) };

    if import_ok == 0 {
        unsafe { libwebp_sys::WebPPictureFree(&mut picture) };
        return Err(Error::EncodeFailed(EncodingError::OutOfMemory));
    }

    // Setup memory writer
    let mut writer = core::mem::MaybeUninit::<libwebp_sys::WebPMemoryWriter>::uninit();
    unsafe { libwebp_sys::WebPMemoryWriterInit(writer.as_mut_ptr()) };
    let mut writer = unsafe { writer.assume_init() };

    picture.writer = Some(libwebp_sys::WebPMemoryWrite);
    picture.custom_ptr = &mut writer as *mut _ as *mut _;

    let ok = unsafe { libwebp_sys::WebPEncode(&webp_config, &mut picture) };

    if ok == 0 {
        let error = EncodingError::from(picture.error_code as i32);
        unsafe {
            libwebp_sys::WebPPictureFree(&mut picture);
            libwebp_sys::WebPMemoryWriterClear(&mut writer);
        }
        return Err(Error::EncodeFailed(error));
    }

    let webp_data = unsafe { core::slice::from_raw_parts(writer.mem, writer.size).to_vec() };
    unsafe {
        libwebp_sys::WebPPictureFree(&mut picture);
        libwebp_sys::WebPMemoryWriterClear(&mut writer);
    }
    Ok(webp_data)
}

/// WebP encoder for one RGB page.
///
/// # Example
///
/// ```rust
/// use imgref::ImgVec;
/// use pageshrink::{Encoder, EncoderConfig};
/// use rgb::RGB8;
///
/// let page = ImgVec::new(vec![RGB8::new(250, 250, 245); 32 * 24], 32, 24);
/// let webp = Encoder::from_rgb(page.as_ref())
///     .config(EncoderConfig::new().quality(80.0))
///     .encode()?;
/// assert!(!webp.is_empty());
/// # Ok::<(), pageshrink::Error>(())
/// ```
pub struct Encoder<'a> {
    img: ImgRef<'a, RGB8>,
    config: EncoderConfig,
}

impl<'a> Encoder<'a> {
    /// Create encoder from an imgref ImgRef<RGB8>. Padded rows are honored.
    #[must_use]
    pub fn from_rgb(img: ImgRef<'a, RGB8>) -> Self {
        Self {
            img,
            config: EncoderConfig::default(),
        }
    }

    /// Set full encoder configuration.
    #[must_use]
    pub fn config(mut self, config: EncoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Encode to WebP bytes.
    pub fn encode(self) -> Result<Vec<u8>> {
        let pixels: &[RGB8] = self.img.buf();
        // SAFETY: RGB8 is repr(C) and has the same layout as [u8; 3]
        let data =
            unsafe { core::slice::from_raw_parts(pixels.as_ptr() as *const u8, pixels.len() * 3) };
        encode_with_config(
            data,
            self.img.width() as u32,
            self.img.height() as u32,
            self.img.stride().saturating_mul(3),
            &self.config,
        )
    }
}

pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(
            "width and height must be non-zero".into(),
        ));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Error::InvalidInput(format!(
            "dimensions {}x{} exceed maximum ({} x {})",
            width, height, MAX_DIMENSION, MAX_DIMENSION
        )));
    }
    Ok(())
}

/// Check `size` bytes hold `height` RGB rows that start `stride` bytes apart.
pub(crate) fn validate_buffer_size(size: usize, width: u32, height: u32, stride: usize) -> Result<()> {
    let row = (width as usize).saturating_mul(3);
    if stride < row {
        return Err(Error::InvalidInput(format!(
            "stride too small: got {}, minimum {}",
            stride, row
        )));
    }

    let expected = stride
        .saturating_mul((height as usize).saturating_sub(1))
        .saturating_add(row);

    if size < expected {
        return Err(Error::InvalidInput(format!(
            "buffer too small: got {}, expected {}",
            size, expected
        )));
    }
    Ok(())
}
