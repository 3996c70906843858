//! Report document assembly
//!
//! The document is an ordered list of blocks. Section order is fixed so two
//! runs over the same data produce identical text.

use std::path::{Component, Path};

use super::markdown::render_table;
use super::table::SummaryTable;
use crate::pipeline::{Overview, Statistics};
use crate::viz::VisualizationRecord;

pub const REPORT_TITLE: &str = "Diamonds dataset EDA";

/// One block of report text
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    Table(SummaryTable),
    Image { alt: String, path: String },
}

impl Block {
    pub fn render(&self) -> String {
        match self {
            Block::Heading { level, text } => {
                format!("{} {}", "#".repeat(*level as usize), text)
            }
            Block::Paragraph(text) => text.clone(),
            Block::Table(table) => render_table(table),
            Block::Image { alt, path } => format!("![{}]({})", alt, path),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDocument {
    blocks: Vec<Block>,
}

impl ReportDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&mut self, level: u8, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Heading {
            level,
            text: text.into(),
        });
        self
    }

    pub fn paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Paragraph(text.into()));
        self
    }

    pub fn table(&mut self, table: SummaryTable) -> &mut Self {
        self.blocks.push(Block::Table(table));
        self
    }

    pub fn image(&mut self, alt: impl Into<String>, path: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Image {
            alt: alt.into(),
            path: path.into(),
        });
        self
    }

    /// Every summary table, in report order
    pub fn tables(&self) -> Vec<&SummaryTable> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Blocks separated by a blank line, with a trailing newline
    pub fn render(&self) -> String {
        let mut text = self
            .blocks
            .iter()
            .map(Block::render)
            .collect::<Vec<_>>()
            .join("\n\n");
        text.push('\n');
        text
    }
}

/// Everything the assembler reads
pub struct ReportInputs<'a> {
    pub dataset_url: &'a str,
    pub overview: &'a Overview,
    pub statistics: &'a Statistics,
    pub visualizations: &'a [VisualizationRecord],
    /// Image directory as referenced from the report file
    pub image_ref_dir: &'a str,
}

/// Build the report in its fixed section order
pub fn assemble_report(inputs: &ReportInputs<'_>) -> ReportDocument {
    let mut doc = ReportDocument::new();
    let overview = inputs.overview;
    let stats = inputs.statistics;

    doc.heading(1, REPORT_TITLE)
        .paragraph(format!(
            "Dataset loaded from seaborn-data: `diamonds` ({})",
            inputs.dataset_url
        ))
        .paragraph(format!("**Shape:** ({}, {})", overview.rows, overview.cols));

    doc.heading(2, "Columns").paragraph(format!(
        "`{}`",
        overview.columns.join("`, `")
    ));

    doc.heading(2, "Sample").table(overview.sample.clone());

    doc.heading(2, "Descriptive Statistics (Summary)")
        .heading(3, "Numeric summary")
        .table(stats.numeric_summary.clone())
        .heading(3, "Skewness and Kurtosis")
        .table(stats.skew_kurtosis.clone())
        .heading(3, "Unique counts (per column)")
        .table(stats.unique_counts.clone())
        .heading(3, "Value counts (categorical)");
    for counts in &stats.value_counts {
        doc.paragraph(format!("**{}**", counts.index_name))
            .table(counts.clone());
    }
    doc.heading(3, "Price per Carat (derived)")
        .table(stats.price_per_carat.clone())
        .heading(3, "Correlation matrix (numeric)")
        .table(stats.correlation.to_table("Correlation matrix"));

    for record in inputs.visualizations {
        doc.heading(2, record.title.clone())
            .image(
                record.title.clone(),
                format!("{}/{}", inputs.image_ref_dir, record.file_name),
            )
            .paragraph("**Associated pivot / summary:**")
            .table(record.table.clone());
    }

    doc
}

/// Image directory expressed relative to the report's directory when possible
pub fn image_ref_dir(report_path: &Path, image_dir: &Path) -> String {
    let report_dir = report_path.parent().unwrap_or_else(|| Path::new(""));
    let report_dir = strip_cur_dir(report_dir);
    let image_dir_clean = strip_cur_dir(image_dir);

    let relative = if report_dir.as_os_str().is_empty() && image_dir.is_relative() {
        Some(image_dir_clean.as_path())
    } else {
        image_dir_clean.strip_prefix(&report_dir).ok()
    };

    let shown = relative.unwrap_or(image_dir);
    let parts: Vec<String> = shown
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else if shown.is_absolute() {
        shown.display().to_string()
    } else {
        parts.join("/")
    }
}

fn strip_cur_dir(path: &Path) -> std::path::PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Cell;

    #[test]
    fn test_render_joins_blocks() {
        let mut doc = ReportDocument::new();
        doc.heading(1, "Title").paragraph("Body");
        assert_eq!(doc.render(), "# Title\n\nBody\n");
    }

    #[test]
    fn test_image_block() {
        let mut doc = ReportDocument::new();
        doc.image("Price Distribution", "images/hist_price.png");
        assert_eq!(doc.render(), "![Price Distribution](images/hist_price.png)\n");
    }

    #[test]
    fn test_table_block_uses_markdown() {
        let mut table = SummaryTable::new("t", "cut", &["count"]);
        table.push_row("Ideal", vec![Cell::Int(21551)]);
        let mut doc = ReportDocument::new();
        doc.table(table);
        assert!(doc.render().contains("21551"));
    }

    #[test]
    fn test_image_ref_dir_relative_to_report() {
        assert_eq!(image_ref_dir(Path::new("analysis.md"), Path::new("images")), "images");
        assert_eq!(
            image_ref_dir(Path::new("./analysis.md"), Path::new("./images")),
            "images"
        );
        assert_eq!(
            image_ref_dir(Path::new("/out/analysis.md"), Path::new("/out/img/charts")),
            "img/charts"
        );
        assert_eq!(
            image_ref_dir(Path::new("/out/analysis.md"), Path::new("/elsewhere/images")),
            "/elsewhere/images"
        );
    }
}
