use pageshrink::{run_with_progress, ConvertConfig, ConvertSummary, ConvertedFile, Result};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = ConvertConfig::default();
    println!("{}", start_line(&config));

    let summary = run_with_progress(&config, |page| println!("{}", progress_line(page)))?;

    println!("{}", summary_line(&summary));
    Ok(())
}

fn start_line(config: &ConvertConfig) -> String {
    format!(
        "⏳ Shrinking pages from {} into {}...",
        config.get_input_dir().display(),
        config.get_output_dir().display()
    )
}

fn progress_line(page: &ConvertedFile) -> String {
    format!("✅ Shrunk: {} -> {}", page.source_name(), page.output_name())
}

fn summary_line(summary: &ConvertSummary) -> String {
    let count = summary.count();
    let pages = if count == 1 { "page" } else { "pages" };
    format!(
        "🎉 Done! {} {} optimized and ready to upload.",
        count, pages
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn page(name: &str, output: &str) -> ConvertedFile {
        ConvertedFile {
            source: PathBuf::from("raw_pages").join(name),
            output: PathBuf::from("ready_pages").join(output),
            width: 10,
            height: 10,
            source_bytes: 100,
            output_bytes: 40,
        }
    }

    #[test]
    fn test_start_line() {
        assert_eq!(
            start_line(&ConvertConfig::default()),
            "⏳ Shrinking pages from raw_pages into ready_pages..."
        );
    }

    #[test]
    fn test_progress_line_uses_file_names() {
        assert_eq!(
            progress_line(&page("b.JPG", "b.webp")),
            "✅ Shrunk: b.JPG -> b.webp"
        );
    }

    #[test]
    fn test_summary_line_counts() {
        let mut summary = ConvertSummary::default();
        assert_eq!(
            summary_line(&summary),
            "🎉 Done! 0 pages optimized and ready to upload."
        );

        summary.files.push(page("a.png", "a.webp"));
        assert_eq!(
            summary_line(&summary),
            "🎉 Done! 1 page optimized and ready to upload."
        );

        summary.files.push(page("b.JPG", "b.webp"));
        assert_eq!(
            summary_line(&summary),
            "🎉 Done! 2 pages optimized and ready to upload."
        );
    }
}
