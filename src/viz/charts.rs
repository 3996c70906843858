//! The six figures, drawn with plotters on any backend

use std::iter::once;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::kde::GaussianKde;
use super::palette::{category_color, coolwarm, HIST_FILL, HIST_LINE};
use super::{ChartData, ChartKind};
use crate::pipeline::pivots::group_by_category;
use crate::pipeline::schema::{clarity_by_name, COLOR_ORDER, CUT_ORDER};
use crate::pipeline::stats::{mean, quantile};

const FONT: &str = "sans-serif";
const CAPTION_SIZE: u32 = 22;

const HIST_BINS: usize = 50;
const CURVE_POINTS: usize = 200;
const VIOLIN_POINTS: usize = 100;

const BOX_HALF_WIDTH: f64 = 0.3;
const VIOLIN_HALF_WIDTH: f64 = 0.4;
const BAR_HALF_WIDTH: f64 = 0.4;

pub fn draw<DB>(kind: ChartKind, root: &DrawingArea<DB, Shift>, data: &ChartData) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    match kind {
        ChartKind::PriceHistogram => price_histogram(root, data),
        ChartKind::PriceByCut => price_by_cut_box(root, data),
        ChartKind::PriceVsCarat => price_carat_scatter(root, data),
        ChartKind::PriceByClarity => price_by_clarity_violin(root, data),
        ChartKind::CorrelationHeatmap => correlation_heatmap(root, data),
        ChartKind::AvgPriceByCut => avg_price_by_cut_bar(root, data),
    }
}

/// 50-bin price histogram with a density curve scaled to counts
pub fn price_histogram<DB>(root: &DrawingArea<DB, Shift>, data: &ChartData) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let price = &data.price;
    let (lo, hi) = bounds(price);
    let width = (hi - lo) / HIST_BINS as f64;

    let mut counts = vec![0usize; HIST_BINS];
    for &v in price.iter().filter(|v| v.is_finite()) {
        let idx = (((v - lo) / width) as usize).min(HIST_BINS - 1);
        counts[idx] += 1;
    }

    let scale = price.len() as f64 * width;
    let curve: Vec<(f64, f64)> = GaussianKde::new(price)
        .map(|kde| kde.curve(lo, hi, CURVE_POINTS))
        .unwrap_or_default()
        .into_iter()
        .map(|(x, d)| (x, d * scale))
        .collect();

    let peak = counts.iter().copied().max().unwrap_or(0) as f64;
    let curve_peak = curve.iter().map(|(_, y)| *y).fold(0.0, f64::max);
    let top = peak.max(curve_peak).max(1.0) * 1.08;

    let mut chart = ChartBuilder::on(root)
        .caption("Distribution of Price", (FONT, CAPTION_SIZE))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(lo..hi, 0f64..top)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("price")
        .y_desc("Count")
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let x0 = lo + i as f64 * width;
        Rectangle::new([(x0, 0.0), (x0 + width, count as f64)], HIST_FILL.mix(0.6).filled())
    }))?;
    chart.draw_series(LineSeries::new(curve, HIST_LINE.stroke_width(2)))?;
    Ok(())
}

/// Box-and-whisker of price per cut, worst cut first
pub fn price_by_cut_box<DB>(root: &DrawingArea<DB, Shift>, data: &ChartData) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let groups = group_by_category(&data.cut, &data.price, &CUT_ORDER);
    let (lo, hi) = padded(bounds(&data.price), 0.04);

    let mut chart = ChartBuilder::on(root)
        .caption("Price by Cut", (FONT, CAPTION_SIZE))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(category_range(CUT_ORDER.len()), lo..hi)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(CUT_ORDER.len())
        .x_label_formatter(&|v| category_label(&CUT_ORDER, *v))
        .x_desc("cut")
        .y_desc("price")
        .draw()?;

    for (i, group) in groups.into_iter().enumerate() {
        let Some(summary) = BoxSummary::new(group) else {
            continue;
        };
        let x = i as f64;
        let (left, right) = (x - BOX_HALF_WIDTH, x + BOX_HALF_WIDTH);
        let cap = BOX_HALF_WIDTH / 2.0;

        chart.draw_series(once(Rectangle::new(
            [(left, summary.q1), (right, summary.q3)],
            category_color(i).filled(),
        )))?;
        chart.draw_series(once(Rectangle::new(
            [(left, summary.q1), (right, summary.q3)],
            BLACK.stroke_width(1),
        )))?;
        chart.draw_series(
            [
                vec![(left, summary.median), (right, summary.median)],
                vec![(x, summary.q3), (x, summary.upper)],
                vec![(x, summary.q1), (x, summary.lower)],
                vec![(x - cap, summary.upper), (x + cap, summary.upper)],
                vec![(x - cap, summary.lower), (x + cap, summary.lower)],
            ]
            .into_iter()
            .map(|line| PathElement::new(line, BLACK.stroke_width(1))),
        )?;
        chart.draw_series(
            summary
                .fliers
                .iter()
                .map(|&y| Circle::new((x, y), 2, BLACK.mix(0.4).stroke_width(1))),
        )?;
    }
    Ok(())
}

/// Price against carat, one translucent series per color grade
pub fn price_carat_scatter<DB>(root: &DrawingArea<DB, Shift>, data: &ChartData) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x_lo, x_hi) = padded(bounds(&data.carat), 0.03);
    let (y_lo, y_hi) = padded(bounds(&data.price), 0.03);

    let mut chart = ChartBuilder::on(root)
        .caption("Price vs Carat (colored by Color)", (FONT, CAPTION_SIZE))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
    chart.configure_mesh().x_desc("carat").y_desc("price").draw()?;

    for (i, grade) in COLOR_ORDER.iter().enumerate() {
        let color = category_color(i);
        let points: Vec<(f64, f64)> = data
            .color
            .iter()
            .zip(data.carat.iter().zip(&data.price))
            .filter(|(c, _)| c.as_str() == *grade)
            .map(|(_, (&x, &y))| (x, y))
            .collect();

        chart
            .draw_series(
                points
                    .into_iter()
                    .map(|p| Circle::new(p, 2, color.mix(0.6).filled())),
            )?
            .label(*grade)
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

/// Mirrored density shapes of price per clarity grade, grades by name
pub fn price_by_clarity_violin<DB>(root: &DrawingArea<DB, Shift>, data: &ChartData) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let order = clarity_by_name();
    let groups = group_by_category(&data.clarity, &data.price, &order);
    let shapes: Vec<Option<ViolinShape>> = groups.iter().map(|g| ViolinShape::new(g)).collect();

    let (lo, hi) = shapes
        .iter()
        .flatten()
        .map(|s| s.extent())
        .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))
        .unwrap_or_else(|| bounds(&data.price));

    let mut chart = ChartBuilder::on(root)
        .caption("Price by Clarity (Violin)", (FONT, CAPTION_SIZE))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(category_range(order.len()), lo..hi)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(order.len())
        .x_label_formatter(&|v| category_label(&order, *v))
        .x_desc("clarity")
        .y_desc("price")
        .draw()?;

    for (i, (shape, group)) in shapes.iter().zip(groups).enumerate() {
        let x = i as f64;
        if let Some(shape) = shape {
            let outline = shape.outline(x);
            let mut closed = outline.clone();
            closed.extend(outline.first().copied());
            chart.draw_series(once(Polygon::new(outline, category_color(i).mix(0.8).filled())))?;
            chart.draw_series(once(PathElement::new(closed, BLACK.stroke_width(1))))?;
        }

        let Some(summary) = BoxSummary::new(group) else {
            continue;
        };
        chart.draw_series(once(Rectangle::new(
            [(x - 0.04, summary.q1), (x + 0.04, summary.q3)],
            BLACK.filled(),
        )))?;
        chart.draw_series(once(Circle::new((x, summary.median), 3, WHITE.filled())))?;
    }
    Ok(())
}

/// Annotated heatmap of the numeric correlation matrix
pub fn correlation_heatmap<DB>(root: &DrawingArea<DB, Shift>, data: &ChartData) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let matrix = &data.correlation;
    let names: Vec<&str> = matrix.names.iter().map(String::as_str).collect();
    let n = names.len().max(1);
    let flip = |row: usize| (n - 1 - row) as f64;

    let mut chart = ChartBuilder::on(root)
        .caption("Correlation matrix (numeric)", (FONT, CAPTION_SIZE))
        .margin(12)
        .x_label_area_size(50)
        .y_label_area_size(110)
        .build_cartesian_2d(category_range(n), category_range(n))?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|v| category_label(&names, *v))
        .y_label_formatter(&|v| category_label(&names, (n - 1) as f64 - *v))
        .x_label_style((FONT, 11))
        .y_label_style((FONT, 11))
        .draw()?;

    let cells: Vec<(f64, f64, f64)> = matrix
        .values
        .iter()
        .enumerate()
        .flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(move |(j, &v)| (j as f64, flip(i), v))
        })
        .collect();

    chart.draw_series(cells.iter().map(|&(x, y, v)| {
        Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], coolwarm(v).filled())
    }))?;
    chart.draw_series(cells.iter().map(|&(x, y, v)| {
        let ink = if v.abs() > 0.6 { WHITE } else { BLACK };
        Text::new(
            annotation(v),
            (x, y),
            (FONT, 12)
                .into_font()
                .color(&ink)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )
    }))?;
    Ok(())
}

/// Mean price per cut as vertical bars
pub fn avg_price_by_cut_bar<DB>(root: &DrawingArea<DB, Shift>, data: &ChartData) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let means: Vec<f64> = group_by_category(&data.cut, &data.price, &CUT_ORDER)
        .iter()
        .map(|g| mean(g))
        .collect();
    let top = means
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption("Average Price by Cut", (FONT, CAPTION_SIZE))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(category_range(CUT_ORDER.len()), 0f64..top)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(CUT_ORDER.len())
        .x_label_formatter(&|v| category_label(&CUT_ORDER, *v))
        .x_desc("cut")
        .y_desc("Average Price")
        .draw()?;

    chart.draw_series(
        means
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_finite())
            .map(|(i, &m)| {
                let x = i as f64;
                Rectangle::new(
                    [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, m)],
                    category_color(i).filled(),
                )
            }),
    )?;
    Ok(())
}

/// Quartiles, Tukey whiskers and outliers of one group
struct BoxSummary {
    q1: f64,
    median: f64,
    q3: f64,
    lower: f64,
    upper: f64,
    fliers: Vec<f64>,
}

impl BoxSummary {
    fn new(mut values: Vec<f64>) -> Option<Self> {
        values.retain(|v| v.is_finite());
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&values, 0.25);
        let q3 = quantile(&values, 0.75);
        let reach = 1.5 * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        let inside = || values.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
        let lower = inside().next().unwrap_or(q1);
        let upper = inside().last().unwrap_or(q3);
        let fliers = values
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(Self {
            q1,
            median: quantile(&values, 0.5),
            q3,
            lower,
            upper,
            fliers,
        })
    }
}

/// Density curve of one group, extended two bandwidths past the data
struct ViolinShape {
    curve: Vec<(f64, f64)>,
    peak: f64,
}

impl ViolinShape {
    fn new(values: &[f64]) -> Option<Self> {
        let kde = GaussianKde::new(values)?;
        let (lo, hi) = bounds(values);
        let reach = 2.0 * kde.bandwidth();
        let curve = kde.curve(lo - reach, hi + reach, VIOLIN_POINTS);
        let peak = curve.iter().map(|(_, d)| *d).fold(0.0, f64::max);
        (peak > 0.0).then_some(Self { curve, peak })
    }

    fn extent(&self) -> (f64, f64) {
        let first = self.curve.first().map_or(0.0, |p| p.0);
        let last = self.curve.last().map_or(0.0, |p| p.0);
        (first, last)
    }

    /// Closed outline centred on `x`: right half going up, left half coming down
    fn outline(&self, x: f64) -> Vec<(f64, f64)> {
        let half = |d: f64| d / self.peak * VIOLIN_HALF_WIDTH;
        let right = self.curve.iter().map(|&(y, d)| (x + half(d), y));
        let left = self.curve.iter().rev().map(|&(y, d)| (x - half(d), y));
        right.chain(left).collect()
    }
}

/// Range of the finite values, widened when degenerate
fn bounds(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    (lo, hi)
}

fn padded((lo, hi): (f64, f64), fraction: f64) -> (f64, f64) {
    let pad = (hi - lo) * fraction;
    (lo - pad, hi + pad)
}

/// Axis with one unit slot per category, centred on the integers
fn category_range(n: usize) -> std::ops::Range<f64> {
    -0.5..n as f64 - 0.5
}

fn category_label(names: &[&str], position: f64) -> String {
    let nearest = position.round();
    if (position - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    names
        .get(nearest as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn annotation(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_only_on_integers() {
        let names = ["Fair", "Good", "Ideal"];
        assert_eq!(category_label(&names, 0.0), "Fair");
        assert_eq!(category_label(&names, 2.0), "Ideal");
        assert_eq!(category_label(&names, 0.5), "");
        assert_eq!(category_label(&names, 3.0), "");
        assert_eq!(category_label(&names, -1.0), "");
    }

    #[test]
    fn test_box_summary_whiskers_and_fliers() {
        let mut values: Vec<f64> = (1..=20).map(f64::from).collect();
        values.push(100.0);

        let summary = BoxSummary::new(values).unwrap();
        assert_eq!(summary.q1, 6.0);
        assert_eq!(summary.median, 11.0);
        assert_eq!(summary.q3, 16.0);
        assert_eq!(summary.lower, 1.0);
        assert_eq!(summary.upper, 20.0);
        assert_eq!(summary.fliers, vec![100.0]);
    }

    #[test]
    fn test_box_summary_empty_group() {
        assert!(BoxSummary::new(vec![]).is_none());
        assert!(BoxSummary::new(vec![f64::NAN]).is_none());
    }

    #[test]
    fn test_violin_outline_is_symmetric() {
        let shape = ViolinShape::new(&[1.0, 2.0, 2.5, 3.0, 5.0]).unwrap();
        let outline = shape.outline(3.0);
        assert_eq!(outline.len(), 2 * VIOLIN_POINTS);

        let n = outline.len();
        for k in 0..VIOLIN_POINTS {
            let (xr, yr) = outline[k];
            let (xl, yl) = outline[n - 1 - k];
            assert_eq!(yr, yl);
            assert!(((xr - 3.0) - (3.0 - xl)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_bounds_degenerate() {
        assert_eq!(bounds(&[]), (0.0, 1.0));
        assert_eq!(bounds(&[2.0, 2.0]), (1.5, 2.5));
        assert_eq!(bounds(&[3.0, f64::NAN, -1.0]), (-1.0, 3.0));
    }

    #[test]
    fn test_annotation_format() {
        assert_eq!(annotation(0.92156), "0.92");
        assert_eq!(annotation(-0.456), "-0.46");
        assert_eq!(annotation(f64::NAN), "nan");
    }
}
