//! One-dimensional Gaussian mixture fitted by expectation-maximization.
//!
//! Initialisation is deterministic: the sorted samples are cut into `k` equal
//! chunks and each chunk seeds one component's weight, mean, and variance.
//! No RNG is involved, so refitting the same window always yields the same
//! model.

use std::f64::consts::PI;

/// Added to every variance so single-valued components stay non-degenerate.
const REG_COVAR: f64 = 1e-6;

/// Stop once the mean log-likelihood moves less than this between iterations.
const TOLERANCE: f64 = 1e-3;

const MAX_ITER: usize = 100;

/// A fitted 1-D Gaussian mixture.
#[derive(Clone, Debug, PartialEq)]
pub struct Gmm1d {
    weights:   Vec<f64>,
    means:     Vec<f64>,
    variances: Vec<f64>,
    converged: bool,
}

impl Gmm1d {
    /// Fit a `k`-component mixture to `data`.
    ///
    /// Returns `None` when `k == 0`, when there are fewer samples than
    /// components, or when any sample is not finite.
    pub fn fit(data: &[f64], k: usize) -> Option<Self> {
        if k == 0 || data.len() < k || data.iter().any(|x| !x.is_finite()) {
            return None;
        }

        let mut model = Self::chunk_init(data, k);
        let mut resp = vec![vec![0.0; k]; data.len()];
        let mut prev_ll = f64::NEG_INFINITY;

        for _ in 0..MAX_ITER {
            let ll = model.e_step(data, &mut resp);
            if (ll - prev_ll).abs() < TOLERANCE {
                model.converged = true;
                break;
            }
            prev_ll = ll;
            model.m_step(data, &resp);
        }

        Some(model)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    /// `Σ weight_j · mean_j`: the mixture's expected value.
    pub fn weighted_mean(&self) -> f64 {
        self.weights.iter().zip(&self.means).map(|(w, m)| w * m).sum()
    }

    fn chunk_init(data: &[f64], k: usize) -> Self {
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();

        let mut weights = Vec::with_capacity(k);
        let mut means = Vec::with_capacity(k);
        let mut variances = Vec::with_capacity(k);

        for j in 0..k {
            let chunk = &sorted[j * n / k..(j + 1) * n / k];
            let len = chunk.len() as f64;
            let mean = chunk.iter().sum::<f64>() / len;
            let var = chunk.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / len;
            weights.push(len / n as f64);
            means.push(mean);
            variances.push(var + REG_COVAR);
        }

        Self { weights, means, variances, converged: false }
    }

    /// Fill `resp` with posterior responsibilities and return the mean
    /// log-likelihood of `data`.
    fn e_step(&self, data: &[f64], resp: &mut [Vec<f64>]) -> f64 {
        let mut total_ll = 0.0;
        for (x, row) in data.iter().zip(resp.iter_mut()) {
            for (j, r) in row.iter_mut().enumerate() {
                *r = self.weights[j].ln() + log_gaussian(*x, self.means[j], self.variances[j]);
            }
            // log-sum-exp keeps tiny densities from underflowing to zero.
            let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let norm = max + row.iter().map(|lp| (lp - max).exp()).sum::<f64>().ln();
            for r in row.iter_mut() {
                *r = (*r - norm).exp();
            }
            total_ll += norm;
        }
        total_ll / data.len() as f64
    }

    fn m_step(&mut self, data: &[f64], resp: &[Vec<f64>]) {
        let n = data.len() as f64;
        for j in 0..self.weights.len() {
            let nk = resp.iter().map(|r| r[j]).sum::<f64>() + 10.0 * f64::EPSILON;
            let mean = resp.iter().zip(data).map(|(r, x)| r[j] * x).sum::<f64>() / nk;
            let var = resp
                .iter()
                .zip(data)
                .map(|(r, x)| r[j] * (x - mean).powi(2))
                .sum::<f64>()
                / nk;
            self.weights[j] = nk / n;
            self.means[j] = mean;
            self.variances[j] = var + REG_COVAR;
        }
    }
}

fn log_gaussian(x: f64, mean: f64, var: f64) -> f64 {
    -0.5 * ((2.0 * PI * var).ln() + (x - mean).powi(2) / var)
}
