//! Equal-width interval binning
//!
//! Bins are right-closed `(lo, hi]` intervals spanning the data range, with the
//! lowest edge pushed down by 0.1% of the range so the minimum lands in the
//! first bin. Labels round the edges to the smallest precision (at least 3)
//! that keeps every edge distinct.

use anyhow::Result;

/// Smallest rounding precision tried for labels
const BASE_PRECISION: i32 = 3;

/// Result of binning one numeric column
#[derive(Debug, Clone)]
pub struct Binning {
    /// `bins + 1` monotonically increasing edges
    pub edges: Vec<f64>,
    /// One label per bin, `(lo, hi]`
    pub labels: Vec<String>,
    /// Bin index per input value, `None` when the value falls outside every bin
    pub assignment: Vec<Option<usize>>,
}

impl Binning {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of values assigned to each bin, empty bins included
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.len()];
        for bin in self.assignment.iter().flatten() {
            counts[*bin] += 1;
        }
        counts
    }
}

/// Split `values` into `bins` equal-width intervals.
pub fn cut_equal_width(values: &[f64], bins: usize) -> Result<Binning> {
    if bins == 0 {
        anyhow::bail!("Number of bins must be at least 1");
    }

    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        anyhow::bail!("Cannot bin a column without finite values");
    }

    let edges = equal_width_edges(min, max, bins);
    let labels = interval_labels(&edges);
    let assignment = values.iter().map(|&v| locate(&edges, v)).collect();

    Ok(Binning {
        edges,
        labels,
        assignment,
    })
}

fn equal_width_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    if min == max {
        // Degenerate range: widen symmetrically
        let pad = if min != 0.0 { 0.001 * min.abs() } else { 0.001 };
        return linspace(min - pad, max + pad, bins + 1);
    }

    let mut edges = linspace(min, max, bins + 1);
    edges[0] -= (max - min) * 0.001;
    edges
}

fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    let step = (stop - start) / (num - 1) as f64;
    let mut out: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
    out[num - 1] = stop;
    out
}

fn locate(edges: &[f64], value: f64) -> Option<usize> {
    if !value.is_finite() || value <= edges[0] || value > edges[edges.len() - 1] {
        return None;
    }
    let idx = edges.partition_point(|e| *e < value);
    Some(idx - 1)
}

fn interval_labels(edges: &[f64]) -> Vec<String> {
    let precision = infer_precision(edges);
    let rounded: Vec<f64> = edges.iter().map(|&e| round_frac(e, precision)).collect();
    rounded
        .windows(2)
        .map(|w| format!("({}, {}]", float_repr(w[0]), float_repr(w[1])))
        .collect()
}

fn infer_precision(edges: &[f64]) -> i32 {
    for precision in BASE_PRECISION..20 {
        let mut levels: Vec<f64> = edges.iter().map(|&e| round_frac(e, precision)).collect();
        levels.sort_by(|a, b| a.total_cmp(b));
        levels.dedup();
        if levels.len() == edges.len() {
            return precision;
        }
    }
    BASE_PRECISION
}

/// Round to `precision` decimals, or `precision` significant decimals for |x| < 1.
fn round_frac(x: f64, precision: i32) -> f64 {
    if !x.is_finite() || x == 0.0 {
        return x;
    }
    let digits = if x.trunc() == 0.0 {
        -(x.fract().abs().log10().floor() as i32) - 1 + precision
    } else {
        precision
    };
    round_to(x, digits)
}

/// Round half away from zero to `digits` decimal places.
pub fn round_to(x: f64, digits: i32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let scale = 10f64.powi(digits);
    (x * scale).round() / scale
}

/// Shortest round-trip rendering that always shows a decimal point.
pub fn float_repr(x: f64) -> String {
    let s = format!("{}", x);
    if x.is_finite() && !s.contains('.') {
        format!("{}.0", s)
    } else {
        s
    }
}
