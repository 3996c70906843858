//! Tests for report assembly and writing, without rendering any images

use diamond_eda::pipeline::pivots::CARAT_BINS;
use diamond_eda::pipeline::{compute_statistics, overview, DiamondTable, Overview, Statistics};
use diamond_eda::report::{assemble_report, write_report, ReportDocument, ReportInputs};
use diamond_eda::viz::{ChartKind, VisualizationRecord};
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

const URL: &str = "https://example.invalid/diamonds.csv";

struct Fixture {
    overview: Overview,
    statistics: Statistics,
    visualizations: Vec<VisualizationRecord>,
}

fn fixture(rows: usize) -> Fixture {
    let mut table: DiamondTable = common::create_diamond_table(rows);
    let overview = overview(&table, 5).unwrap();
    table.derive_price_per_carat().unwrap();
    let statistics = compute_statistics(&table).unwrap();
    table.derive_carat_bins(CARAT_BINS).unwrap();

    let visualizations = ChartKind::ALL
        .iter()
        .map(|kind| VisualizationRecord {
            title: kind.title().to_string(),
            file_name: kind.file_name().to_string(),
            table: kind.summary(&table, &statistics).unwrap(),
        })
        .collect();

    Fixture {
        overview,
        statistics,
        visualizations,
    }
}

fn assemble(f: &Fixture) -> ReportDocument {
    assemble_report(&ReportInputs {
        dataset_url: URL,
        overview: &f.overview,
        statistics: &f.statistics,
        visualizations: &f.visualizations,
        image_ref_dir: "images",
    })
}

#[test]
fn test_report_is_deterministic() {
    let first = assemble(&fixture(150)).render();
    let second = assemble(&fixture(150)).render();
    assert_eq!(first, second, "Same input must give byte-identical reports");
}

#[test]
fn test_report_starts_with_title() {
    let text = assemble(&fixture(40)).render();
    assert!(text.starts_with("# Diamonds dataset EDA\n"));
    assert!(text.ends_with('\n'));
    assert!(text.contains("**Shape:** (40, 10)"));
    assert!(text.contains(URL));
}

#[test]
fn test_visualization_sections_in_order() {
    let text = assemble(&fixture(80)).render();

    let mut cursor = 0;
    for kind in ChartKind::ALL {
        let heading = format!("\n## {}\n", kind.title());
        let found = text[cursor..]
            .find(&heading)
            .unwrap_or_else(|| panic!("section '{}' missing or out of order", kind.title()));
        cursor += found + heading.len();

        let image = format!("](images/{})", kind.file_name());
        let image_at = text[cursor..].find(&image).expect("image link");
        let pivot_at = text[cursor..]
            .find("**Associated pivot / summary:**")
            .expect("pivot caption");
        assert!(image_at < pivot_at, "image must precede its pivot");
    }
}

#[test]
fn test_statistics_section_precedes_charts() {
    let text = assemble(&fixture(60)).render();

    let order = [
        "## Columns",
        "## Sample",
        "## Descriptive Statistics (Summary)",
        "### Numeric summary",
        "### Skewness and Kurtosis",
        "### Unique counts (per column)",
        "### Value counts (categorical)",
        "### Price per Carat (derived)",
        "### Correlation matrix (numeric)",
        "## Price Distribution",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|h| text.find(h).unwrap_or_else(|| panic!("'{}' missing", h)))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_every_table_is_markdown() {
    let doc = assemble(&fixture(50));
    // sample, 3 stats tables, 3 value counts, price per carat, correlation, 6 pivots
    assert_eq!(doc.tables().len(), 15);

    let text = doc.render();
    let separators = text.lines().filter(|l| l.starts_with("|-") || l.starts_with("|:")).count();
    assert_eq!(separators, 15);
}

#[test]
fn test_written_report_matches_render() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("analysis.md");
    let doc = assemble(&fixture(30));

    write_report(&path, &doc).unwrap();
    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, doc.render());
}
