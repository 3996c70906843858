//! Visualization module - six charts, each paired with a summary table

pub mod canvas;
pub mod charts;
pub mod kde;
pub mod palette;

use std::path::Path;

use anyhow::Result;
use log::debug;

use crate::pipeline::pivots;
use crate::pipeline::{CorrelationMatrix, DiamondTable, Statistics};
use crate::report::SummaryTable;

pub use canvas::with_canvas;

/// Columns the charts read, extracted once per run
#[derive(Debug, Clone)]
pub struct ChartData {
    pub price: Vec<f64>,
    pub carat: Vec<f64>,
    pub cut: Vec<String>,
    pub color: Vec<String>,
    pub clarity: Vec<String>,
    pub correlation: CorrelationMatrix,
}

impl ChartData {
    pub fn from_table(table: &DiamondTable, correlation: &CorrelationMatrix) -> Result<Self> {
        Ok(Self {
            price: table.numeric("price")?,
            carat: table.numeric("carat")?,
            cut: table.categorical("cut")?,
            color: table.categorical("color")?,
            clarity: table.categorical("clarity")?,
            correlation: correlation.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    PriceHistogram,
    PriceByCut,
    PriceVsCarat,
    PriceByClarity,
    CorrelationHeatmap,
    AvgPriceByCut,
}

impl ChartKind {
    /// Report order
    pub const ALL: [ChartKind; 6] = [
        ChartKind::PriceHistogram,
        ChartKind::PriceByCut,
        ChartKind::PriceVsCarat,
        ChartKind::PriceByClarity,
        ChartKind::CorrelationHeatmap,
        ChartKind::AvgPriceByCut,
    ];

    /// Section heading in the report
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::PriceHistogram => "Price Distribution",
            ChartKind::PriceByCut => "Price by Cut (boxplot)",
            ChartKind::PriceVsCarat => "Price vs Carat (mean price pivot)",
            ChartKind::PriceByClarity => "Price by Clarity (violin)",
            ChartKind::CorrelationHeatmap => "Correlation Matrix",
            ChartKind::AvgPriceByCut => "Average Price by Cut",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::PriceHistogram => "hist_price.png",
            ChartKind::PriceByCut => "boxplot_price_cut.png",
            ChartKind::PriceVsCarat => "scatter_price_carat_color.png",
            ChartKind::PriceByClarity => "violin_price_clarity.png",
            ChartKind::CorrelationHeatmap => "heatmap_correlation.png",
            ChartKind::AvgPriceByCut => "bar_avg_price_cut.png",
        }
    }

    /// Pixel size of the rendered figure
    pub fn size(self) -> (u32, u32) {
        match self {
            ChartKind::PriceVsCarat | ChartKind::CorrelationHeatmap => (800, 600),
            ChartKind::AvgPriceByCut => (700, 500),
            _ => (800, 500),
        }
    }

    /// The cross-tab shown under the chart
    pub fn summary(self, table: &DiamondTable, stats: &Statistics) -> Result<SummaryTable> {
        match self {
            ChartKind::PriceHistogram => pivots::price_bin_counts(table),
            ChartKind::PriceByCut => pivots::price_spread_by_cut(table),
            ChartKind::PriceVsCarat => pivots::mean_price_by_carat_color(table),
            ChartKind::PriceByClarity => pivots::price_by_clarity(table),
            ChartKind::CorrelationHeatmap => Ok(pivots::rounded_correlation(&stats.correlation)),
            ChartKind::AvgPriceByCut => pivots::avg_price_by_cut(table),
        }
    }
}

/// One rendered chart and its paired table
#[derive(Debug, Clone)]
pub struct VisualizationRecord {
    pub title: String,
    pub file_name: String,
    pub table: SummaryTable,
}

/// Render every chart into `image_dir`, in report order.
///
/// The carat bins must already be derived on `table`. `on_rendered` is
/// called after each image is written. The first failure aborts the run.
pub fn render_visualizations<F>(
    table: &DiamondTable,
    stats: &Statistics,
    image_dir: &Path,
    mut on_rendered: F,
) -> Result<Vec<VisualizationRecord>>
where
    F: FnMut(ChartKind),
{
    let data = ChartData::from_table(table, &stats.correlation)?;
    let mut records = Vec::with_capacity(ChartKind::ALL.len());

    for kind in ChartKind::ALL {
        let summary = kind.summary(table, stats)?;
        let path = image_dir.join(kind.file_name());
        with_canvas(&path, kind.size(), kind.file_name(), |root| {
            charts::draw(kind, root, &data)
        })?;
        debug!("Rendered {} to {}", kind.title(), path.display());

        records.push(VisualizationRecord {
            title: kind.title().to_string(),
            file_name: kind.file_name().to_string(),
            table: summary,
        });
        on_rendered(kind);
    }

    Ok(records)
}
