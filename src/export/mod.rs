//! Writing result tables to disk.
//!
//! Four formats are supported: CSV (with a UTF-8 byte order mark so
//! spreadsheet apps detect the encoding), Excel workbooks, a standalone HTML
//! page and a Markdown report. Files land in the exporter's output
//! directory, named after the search keywords.

mod csv;
mod excel;
pub(crate) mod html;
mod markdown;

pub use html::render_html;
pub use markdown::render_markdown;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::models::ResultTable;

/// File stem used when no keywords were given
pub const DEFAULT_FILENAME_BASE: &str = "all_papers";

/// Timestamp layout shown in HTML and Markdown reports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
    Html,
    Markdown,
}

impl ExportFormat {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "md",
        }
    }

    /// MIME type served for downloads
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "html" => Ok(ExportFormat::Html),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Errors raised while writing an export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Export path escapes the output directory: {0}")]
    OutsideOutputDir(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Replace everything outside `[A-Za-z0-9_-]` with `_`
///
/// Keywords come from users, so they must never contribute a path
/// separator, a drive prefix or a `..` component to the file name.
fn sanitize_keyword(keyword: &str) -> String {
    keyword
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// File stem for an export: sanitized keywords joined by `_`, or
/// [`DEFAULT_FILENAME_BASE`]
pub fn filename_base<S: AsRef<str>>(keywords: Option<&[S]>) -> String {
    let joined = keywords
        .unwrap_or_default()
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(sanitize_keyword)
        .collect::<Vec<_>>()
        .join("_");

    if joined.is_empty() {
        DEFAULT_FILENAME_BASE.to_string()
    } else {
        joined
    }
}

/// Writes [`ResultTable`]s into an output directory
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path an export with these keywords would be written to
    pub fn path_for<S: AsRef<str>>(&self, format: ExportFormat, keywords: Option<&[S]>) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", filename_base(keywords), format.extension()))
    }

    /// Write `table` in `format` and return the file path
    ///
    /// The output directory is created if it does not exist yet. An
    /// existing file with the same name is overwritten.
    pub fn export<S: AsRef<str>>(
        &self,
        table: &ResultTable,
        format: ExportFormat,
        keywords: Option<&[S]>,
    ) -> Result<PathBuf, ExportError> {
        let path = self.path_for(format, keywords);
        if path.parent() != Some(self.output_dir.as_path()) {
            return Err(ExportError::OutsideOutputDir(path));
        }
        std::fs::create_dir_all(&self.output_dir)?;
        let keyword_list: Vec<String> = keywords
            .unwrap_or_default()
            .iter()
            .map(|k| k.as_ref().to_string())
            .collect();
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();

        match format {
            ExportFormat::Csv => csv::write_csv(table, &path)?,
            ExportFormat::Excel => excel::write_workbook(table, &path)?,
            ExportFormat::Html => {
                std::fs::write(&path, render_html(table, &keyword_list, &timestamp))?
            }
            ExportFormat::Markdown => {
                std::fs::write(&path, render_markdown(table, &keyword_list, &timestamp))?
            }
        }

        tracing::info!("Results saved to: {}", path.display());
        Ok(path)
    }
}

/// `true` when a link cell should be rendered as a hyperlink
pub(crate) fn is_linkable(value: &str) -> bool {
    value != crate::models::NOT_FOUND && value.starts_with("http")
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_table;
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_format_parsing() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("Excel".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(_))
        ));
        assert_eq!(ExportFormat::Markdown.to_string(), "markdown");
        assert_eq!(ExportFormat::Excel.extension(), "xlsx");
    }

    #[test]
    fn test_filename_base() {
        assert_eq!(filename_base::<&str>(None), "all_papers");
        assert_eq!(filename_base(Some(&[] as &[&str])), "all_papers");
        assert_eq!(filename_base(Some(&["diffusion", "nerf"][..])), "diffusion_nerf");
        assert_eq!(filename_base(Some(&[" RGB/D ", "multi-view"][..])), "RGB_D_multi-view");
        assert_eq!(filename_base(Some(&["../etc/passwd"][..])), "___etc_passwd");
        assert_eq!(filename_base(Some(&["C:\\temp"][..])), "C__temp");
    }

    #[test]
    fn test_keyword_with_slash_exports() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path());

        let path = exporter
            .export(&sample_table(), ExportFormat::Csv, Some(&["RGB/D"][..]))
            .unwrap();

        assert_eq!(path, dir.path().join("RGB_D.csv"));
        assert!(path.exists());
    }

    #[test]
    fn test_keywords_cannot_leave_output_directory() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        let exporter = Exporter::new(dir.path().join("results"));
        let absolute = outside.path().join("written").to_string_lossy().into_owned();

        for keyword in [absolute.as_str(), "../written", "..", "/"] {
            let path = exporter
                .export(&sample_table(), ExportFormat::Markdown, Some(&[keyword][..]))
                .unwrap();
            assert_eq!(path.parent(), Some(exporter.output_dir()));
        }

        assert!(!outside.path().join("written.md").exists());
        assert!(!dir.path().join("written.md").exists());
    }

    #[test]
    fn test_creates_output_directory() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path().join("nested").join("results"));

        let path = exporter
            .export(&sample_table(), ExportFormat::Markdown, Some(&["diffusion"][..]))
            .unwrap();

        assert_eq!(path, dir.path().join("nested").join("results").join("diffusion.md"));
        assert!(path.exists());
    }

    #[test]
    fn test_every_format_writes_a_file() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path());

        for format in [
            ExportFormat::Csv,
            ExportFormat::Excel,
            ExportFormat::Html,
            ExportFormat::Markdown,
        ] {
            let path = exporter.export::<&str>(&sample_table(), format, None).unwrap();
            assert_eq!(
                path.file_name().unwrap().to_string_lossy(),
                format!("all_papers.{}", format.extension())
            );
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }
}
