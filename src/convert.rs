//! Batch conversion of a directory of pages.
//!
//! A run lists the input directory once, keeps the PNG/JPEG entries, and
//! converts them one at a time in file-name order. The first failure ends the
//! run; pages written before it stay on disk.

use crate::config::{ConvertConfig, EncoderConfig};
use crate::decode::load_rgb;
use crate::encode::Encoder;
use crate::error::{Error, Result};
use crate::types::{webp_file_name, SourceFormat};
use std::fs;
use std::path::{Path, PathBuf};

/// One successfully converted page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    /// Source image that was read.
    pub source: PathBuf,
    /// WebP file that was written.
    pub output: PathBuf,
    /// Page width in pixels.
    pub width: u32,
    /// Page height in pixels.
    pub height: u32,
    /// Size of the source file in bytes.
    pub source_bytes: u64,
    /// Size of the written WebP file in bytes.
    pub output_bytes: u64,
}

impl ConvertedFile {
    /// File name of the source, for display.
    pub fn source_name(&self) -> String {
        display_name(&self.source)
    }

    /// File name of the output, for display.
    pub fn output_name(&self) -> String {
        display_name(&self.output)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Outcome of a completed run, in conversion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Converted pages.
    pub files: Vec<ConvertedFile>,
}

impl ConvertSummary {
    /// Number of pages converted.
    pub fn count(&self) -> usize {
        self.files.len()
    }

    /// Total size of the sources that were converted.
    pub fn source_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.source_bytes).sum()
    }

    /// Total size of the WebP files written.
    pub fn output_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.output_bytes).sum()
    }
}

/// Convert every PNG/JPEG page of `config.input_dir` into `config.output_dir`.
///
/// # Example
///
/// ```rust,no_run
/// use pageshrink::ConvertConfig;
///
/// let summary = pageshrink::run(&ConvertConfig::default())?;
/// println!("{} pages optimized", summary.count());
/// # Ok::<(), pageshrink::Error>(())
/// ```
pub fn run(config: &ConvertConfig) -> Result<ConvertSummary> {
    run_with_progress(config, |_| {})
}

/// Like [`run`], calling `on_converted` right after each page is written.
pub fn run_with_progress<F>(config: &ConvertConfig, mut on_converted: F) -> Result<ConvertSummary>
where
    F: FnMut(&ConvertedFile),
{
    let encoder = config.encoder_config()?;
    let input_dir = config.get_input_dir();
    let output_dir = config.get_output_dir();

    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let sources = list_sources(input_dir)?;
    debug!(
        "{} candidate page(s) in {}",
        sources.len(),
        input_dir.display()
    );

    let mut summary = ConvertSummary::default();
    for source in sources {
        let converted = convert_file(&source, output_dir, &encoder)?;
        info!(
            "{} -> {} ({}x{}, {} -> {} bytes)",
            converted.source_name(),
            converted.output_name(),
            converted.width,
            converted.height,
            converted.source_bytes,
            converted.output_bytes
        );
        on_converted(&converted);
        summary.files.push(converted);
    }

    info!(
        "converted {} page(s) from {} into {} ({} -> {} bytes)",
        summary.count(),
        input_dir.display(),
        output_dir.display(),
        summary.source_bytes(),
        summary.output_bytes()
    );
    Ok(summary)
}

/// Decode one page, flatten it to RGB, encode it and write it into `output_dir`.
///
/// An existing file with the same output name is overwritten.
pub fn convert_file(
    source: &Path,
    output_dir: &Path,
    encoder: &EncoderConfig,
) -> Result<ConvertedFile> {
    let name = source.file_name().ok_or_else(|| {
        Error::InvalidInput(format!("{} has no file name", source.display()))
    })?;
    let output = output_dir.join(webp_file_name(name));

    let page = load_rgb(source)?;
    let webp = Encoder::from_rgb(page.as_ref())
        .config(encoder.clone())
        .encode()?;
    let (width, height) = (page.width() as u32, page.height() as u32);
    drop(page);

    fs::write(&output, &webp).map_err(|e| Error::io(&output, e))?;

    let source_bytes = fs::metadata(source)
        .map_err(|e| Error::io(source, e))?
        .len();
    let output_bytes = webp.len() as u64;
    if output_bytes > source_bytes {
        warn!(
            "{} grew from {} to {} bytes",
            output.display(),
            source_bytes,
            output_bytes
        );
    }

    Ok(ConvertedFile {
        source: source.to_path_buf(),
        output,
        width,
        height,
        source_bytes,
        output_bytes,
    })
}

/// Accepted regular files directly inside `input_dir`, sorted by name.
fn list_sources(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(input_dir).map_err(|e| Error::io(input_dir, e))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(input_dir, e))?;
        let name = entry.file_name();

        if SourceFormat::from_file_name(&name).is_none() {
            debug!("skipping {:?}", name);
            continue;
        }

        let path = entry.path();
        // Follows symlinks. Unreadable entries are kept so that they fail in
        // turn, after the pages sorted before them are written.
        if let Ok(metadata) = fs::metadata(&path) {
            if !metadata.is_file() {
                debug!("skipping {}: not a regular file", path.display());
                continue;
            }
        }

        sources.push(path);
    }

    sources.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(sources)
}
