//! Conversion and encoder configuration types.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Directory scanned for source pages when none is given.
pub const DEFAULT_INPUT_DIR: &str = "raw_pages";

/// Directory receiving the WebP files when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "ready_pages";

/// Lossy quality used for every page when none is given.
pub const DEFAULT_QUALITY: f32 = 80.0;

/// Settings for one batch run: where pages come from, where they go, and
/// how hard they are compressed.
///
/// # Example
///
/// ```rust
/// use pageshrink::ConvertConfig;
///
/// let config = ConvertConfig::new("scans", "out/webp").quality(70.0);
/// assert_eq!(config.get_quality(), 70.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub(crate) input_dir: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) quality: f32,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            quality: DEFAULT_QUALITY,
        }
    }
}

impl ConvertConfig {
    /// Create a configuration for the given directories at the default quality.
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Set the directory scanned for PNG/JPEG pages.
    #[must_use]
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// Set the directory receiving the WebP files. Created if missing.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set lossy quality (0.0 = smallest, 100.0 = best).
    ///
    /// Out-of-range values are rejected by [`ConvertConfig::validate`]
    /// rather than clamped.
    #[must_use]
    pub fn quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    /// Source directory.
    #[must_use]
    pub fn get_input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Destination directory.
    #[must_use]
    pub fn get_output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Lossy quality.
    #[must_use]
    pub fn get_quality(&self) -> f32 {
        self.quality
    }

    /// Check the quality lies on libwebp's 0..=100 scale.
    pub fn validate(&self) -> Result<()> {
        if !self.quality.is_finite() || !(0.0..=100.0).contains(&self.quality) {
            return Err(Error::InvalidConfig(format!(
                "quality must be within 0..=100, got {}",
                self.quality
            )));
        }
        Ok(())
    }

    /// Encoder settings shared by every page of the run.
    pub fn encoder_config(&self) -> Result<EncoderConfig> {
        self.validate()?;
        let config = EncoderConfig::new().quality(self.quality);
        config.validate()?;
        Ok(config)
    }
}

/// WebP encoder configuration. Dimension-independent, reusable across images.
///
/// Output is always lossy with libwebp's default preset and method 4; only
/// the quality varies.
///
/// # Example
///
/// ```rust
/// use pageshrink::EncoderConfig;
///
/// let config = EncoderConfig::new().quality(80.0);
///
/// let page = vec![255u8; 8 * 6 * 3]; // 8x6 RGB
/// let webp = config.encode_rgb(&page, 8, 6)?;
/// assert_eq!(&webp[8..12], b"WEBP");
/// # Ok::<(), pageshrink::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    pub(crate) quality: f32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

impl EncoderConfig {
    /// Create a new encoder configuration at [`DEFAULT_QUALITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set encoding quality (0.0 = smallest, 100.0 = best).
    #[must_use]
    pub fn quality(mut self, quality: f32) -> Self {
        self.quality = quality.clamp(0.0, 100.0);
        self
    }

    /// Encode RGB pixel data to WebP (no alpha).
    ///
    /// # Arguments
    /// - `data`: RGB pixel data (3 bytes per pixel, rows packed)
    /// - `width`: Image width in pixels
    /// - `height`: Image height in pixels
    pub fn encode_rgb(&self, data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let stride = (width as usize).saturating_mul(3);
        crate::encode::encode_with_config(data, width, height, stride, self)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let _ = self.to_libwebp()?;
        Ok(())
    }

    /// Convert to libwebp WebPConfig.
    pub(crate) fn to_libwebp(&self) -> Result<libwebp_sys::WebPConfig> {
        let mut config = libwebp_sys::WebPConfig::new_with_preset(
            libwebp_sys::WebPPreset::WEBP_PRESET_DEFAULT,
            self.quality,
        )
        .map_err(|_| Error::InvalidConfig("failed to initialize config".into()))?;

        // Lossy only; thread_level stays 0 so runs are single-threaded.
        config.lossless = 0;
        config.method = 4;
        config.thread_level = 0;

        if unsafe { libwebp_sys::WebPValidateConfig(&config) } == 0 {
            return Err(Error::InvalidConfig("config validation failed".into()));
        }

        Ok(config)
    }

    /// Get the quality setting.
    #[must_use]
    pub fn get_quality(&self) -> f32 {
        self.quality
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_config_defaults() {
        let config = ConvertConfig::default();
        assert_eq!(config.get_input_dir(), Path::new("raw_pages"));
        assert_eq!(config.get_output_dir(), Path::new("ready_pages"));
        assert_eq!(config.get_quality(), 80.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_convert_config_builder() {
        let config = ConvertConfig::new("in", "out")
            .input_dir("scans")
            .quality(55.0);
        assert_eq!(config.get_input_dir(), Path::new("scans"));
        assert_eq!(config.get_output_dir(), Path::new("out"));
        assert_eq!(config.get_quality(), 55.0);
    }

    #[test]
    fn test_convert_config_rejects_bad_quality() {
        for q in [-1.0, 100.5, f32::NAN, f32::INFINITY] {
            let config = ConvertConfig::default().quality(q);
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "quality {} should be rejected",
                q
            );
            assert!(config.encoder_config().is_err());
        }
    }

    #[test]
    fn test_encoder_config_from_convert_config() {
        let encoder = ConvertConfig::default().quality(65.0).encoder_config().unwrap();
        assert_eq!(encoder.get_quality(), 65.0);
        assert_eq!(EncoderConfig::new().get_quality(), DEFAULT_QUALITY);
    }

    #[test]
    fn test_encoder_config_clamps_quality() {
        assert_eq!(EncoderConfig::new().quality(150.0).get_quality(), 100.0);
        assert_eq!(EncoderConfig::new().quality(-3.0).get_quality(), 0.0);
        assert!(EncoderConfig::new().quality(0.0).validate().is_ok());
        assert!(EncoderConfig::new().quality(100.0).validate().is_ok());
    }

    #[test]
    fn test_to_libwebp_is_lossy() {
        let config = EncoderConfig::new().to_libwebp().unwrap();
        assert_eq!(config.lossless, 0);
        assert_eq!(config.method, 4);
        assert_eq!(config.quality, DEFAULT_QUALITY);
    }
}
