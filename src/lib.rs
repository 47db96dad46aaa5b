//! # pageshrink
//!
//! Batch conversion of PNG/JPEG page scans into lossy WebP.
//!
//! Every page found directly inside the input directory is decoded,
//! flattened to 3-channel RGB (alpha and extra channels are dropped), encoded
//! through libwebp at a fixed quality and written to the output directory
//! under the same base name with a `.webp` extension.
//!
//! Runs are sequential and stop at the first page that fails to decode,
//! encode or write.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pageshrink::ConvertConfig;
//!
//! // raw_pages/*.{png,jpg,jpeg} -> ready_pages/*.webp at quality 80
//! let summary = pageshrink::run(&ConvertConfig::default())?;
//! println!("{} pages optimized", summary.count());
//! # Ok::<(), pageshrink::Error>(())
//! ```
//!
//! ## Encoding a single page
//!
//! ```rust
//! let rgb = vec![240u8; 64 * 48 * 3];
//! let webp = pageshrink::EncoderConfig::new().encode_rgb(&rgb, 64, 48)?;
//! let info = pageshrink::WebpInfo::from_webp(&webp)?;
//! assert_eq!((info.width, info.height), (64, 48));
//! assert!(!info.has_alpha);
//! # Ok::<(), pageshrink::Error>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod config;
mod convert;
mod decode;
mod encode;
mod error;
mod types;

// Re-exports
pub use config::{
    ConvertConfig, EncoderConfig, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_QUALITY,
};
pub use convert::{convert_file, run, run_with_progress, ConvertSummary, ConvertedFile};
pub use decode::{load_rgb, to_rgb};
pub use encode::{Encoder, MAX_DIMENSION};
pub use error::{EncodingError, Error, Result};
pub use types::{webp_file_name, BitstreamFormat, SourceFormat, WebpInfo};
