//! Gaussian kernel density estimate with Scott's bandwidth rule

use std::f64::consts::PI;

use crate::pipeline::stats::std_dev;

#[derive(Debug, Clone)]
pub struct GaussianKde {
    data: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// `None` for fewer than two points or zero spread
    pub fn new(data: &[f64]) -> Option<Self> {
        let data: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
        if data.len() < 2 {
            return None;
        }
        let std = std_dev(&data);
        if !(std > 0.0) {
            return None;
        }
        let factor = (data.len() as f64).powf(-0.2);
        Some(Self {
            bandwidth: factor * std,
            data,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn density(&self, x: f64) -> f64 {
        let norm = 1.0 / (self.data.len() as f64 * self.bandwidth * (2.0 * PI).sqrt());
        let sum: f64 = self
            .data
            .iter()
            .map(|v| {
                let z = (x - v) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum();
        sum * norm
    }

    /// `(x, density)` at `points` evenly spaced positions over `[lo, hi]`
    pub fn curve(&self, lo: f64, hi: f64, points: usize) -> Vec<(f64, f64)> {
        if points < 2 {
            return vec![(lo, self.density(lo))];
        }
        let step = (hi - lo) / (points - 1) as f64;
        (0..points)
            .map(|i| {
                let x = lo + i as f64 * step;
                (x, self.density(x))
            })
            .collect()
    }
}
