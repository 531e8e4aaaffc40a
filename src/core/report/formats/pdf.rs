//! PDF report generator via HTML-to-PDF conversion
//!
//! Renders the HTML report to a temporary file and prints it to PDF with
//! headless Chrome/Chromium, or with a user-specified converter binary that
//! accepts the same flags.

use super::html::HtmlReporter;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::path::Path;
use std::process::{Command, Stdio};

const CHROME_CANDIDATES: [&str; 8] = [
    "google-chrome",
    "chrome",
    "chromium",
    "chromium-browser",
    "google-chrome-stable",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
    "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
];

/// PDF report generator using HTML-to-PDF conversion
pub struct PdfReporter {
    /// Optional custom converter command
    converter: Option<String>,
}

impl PdfReporter {
    /// Create a new PDF reporter that auto-detects Chrome/Chromium
    #[must_use]
    pub const fn new() -> Self {
        Self { converter: None }
    }

    /// Create a PDF reporter with a custom converter
    #[must_use]
    pub fn with_converter(converter: &str) -> Self {
        Self {
            converter: Some(converter.to_owned()),
        }
    }

    fn detect_chrome() -> Option<&'static str> {
        CHROME_CANDIDATES.into_iter().find(|candidate| {
            Command::new(candidate)
                .arg("--version")
                .output()
                .is_ok_and(|output| output.status.success())
        })
    }

    fn print_to_pdf(
        chrome_cmd: &str,
        html_path: &Path,
        pdf_path: &Path,
    ) -> Result<(), Box<dyn Error>> {
        crate::debug!("Printing {} with {chrome_cmd}", html_path.display());

        // stderr is silenced: Chrome logs DBus noise on most Linux desktops
        let status = Command::new(chrome_cmd)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(format!("file://{}", html_path.canonicalize()?.display()))
            .stderr(Stdio::null())
            .stdout(Stdio::null())
            .status()?;

        if !status.success() {
            return Err(format!("PDF conversion with '{chrome_cmd}' failed ({status})").into());
        }
        Ok(())
    }

    fn convert_html_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(converter) = &self.converter {
            return Self::print_to_pdf(converter, html_path, pdf_path);
        }

        if let Some(chrome) = Self::detect_chrome() {
            return Self::print_to_pdf(chrome, html_path, pdf_path);
        }

        Err("PDF conversion failed: Chrome/Chromium not found.\n\
            \n\
            Install Chrome or Chromium, or generate an HTML report with\n\
            `gradplanner report <PLAN> -f html` and print it from a browser.\n"
            .into())
    }
}

impl Default for PdfReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for PdfReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let html_path =
            std::env::temp_dir().join(format!("gradplanner_report_{}.html", std::process::id()));

        HtmlReporter::new().generate(ctx, &html_path)?;
        let result = self.convert_html_to_pdf(&html_path, output_path);
        let _ = std::fs::remove_file(&html_path);

        result
    }

    /// PDF output is binary; `render` returns the HTML it would print
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        HtmlReporter::new().render(ctx)
    }
}
