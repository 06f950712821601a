//! Multi-run mode comparison.
//!
//! Repeats a configuration under one mode with derived seeds and averages the
//! three metric sequences slot-wise, then reports relative gains of PURE over
//! the two single-capability baselines.

use serde::Serialize;
use tracing::{debug, info};
use uav_core::{Mode, SimConfig, SimRng};
use uav_sim::{NoopObserver, SimBuilder};

use crate::{OutputError, OutputResult};

/// Slot-wise means over several runs of one mode.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AveragedMetrics {
    pub mode:              Mode,
    pub runs:              usize,
    pub energy_efficiency: Vec<f64>,
    pub threats_handled:   Vec<f64>,
    pub total_energy:      Vec<f64>,
}

impl AveragedMetrics {
    pub fn mean_efficiency(&self) -> f64 {
        mean(&self.energy_efficiency)
    }

    pub fn mean_threats_handled(&self) -> f64 {
        mean(&self.threats_handled)
    }

    pub fn mean_total_energy(&self) -> f64 {
        mean(&self.total_energy)
    }
}

/// Run `config` under `mode` `runs` times and average each metric per slot.
///
/// Run `r` is seeded with [`SimRng::run_seed`]`(base_seed, r)`.
pub fn run_averaged(
    config:    &SimConfig,
    mode:      Mode,
    runs:      usize,
    base_seed: u64,
) -> OutputResult<AveragedMetrics> {
    if runs == 0 {
        return Err(OutputError::NoRuns);
    }

    let slots = config.time_slots as usize;
    let mut avg = AveragedMetrics {
        mode,
        runs,
        energy_efficiency: vec![0.0; slots],
        threats_handled:   vec![0.0; slots],
        total_energy:      vec![0.0; slots],
    };

    for run in 0..runs {
        let seed = SimRng::run_seed(base_seed, run as u64);
        let mut sim = SimBuilder::standard(config.clone().with_mode(mode))?
            .seed(seed)
            .build()?;
        let metrics = sim.run(&mut NoopObserver)?;

        accumulate(&mut avg.energy_efficiency, metrics.energy_efficiency.iter().copied());
        accumulate(&mut avg.threats_handled, metrics.threats_handled.iter().map(|&n| n as f64));
        accumulate(&mut avg.total_energy, metrics.total_energy.iter().copied());
        debug!(mode = %mode, run, seed, "comparison run complete");
    }

    let n = runs as f64;
    avg.energy_efficiency
        .iter_mut()
        .chain(avg.threats_handled.iter_mut())
        .chain(avg.total_energy.iter_mut())
        .for_each(|v| *v /= n);

    info!(
        mode            = %mode,
        runs,
        mean_efficiency = avg.mean_efficiency(),
        mean_threats    = avg.mean_threats_handled(),
        "averaged runs",
    );
    Ok(avg)
}

/// Relative gain of PURE over each baseline, in percent.
///
/// A gain is `None` when the baseline mean is zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PercentageGains {
    pub efficiency_over_ecop:     Option<f64>,
    pub efficiency_over_mpc_only: Option<f64>,
    pub threats_over_ecop:        Option<f64>,
    pub threats_over_mpc_only:    Option<f64>,
}

impl PercentageGains {
    pub fn between(pure: &AveragedMetrics, ecop: &AveragedMetrics, mpc_only: &AveragedMetrics) -> Self {
        let eff = pure.mean_efficiency();
        let thr = pure.mean_threats_handled();
        Self {
            efficiency_over_ecop:     percentage_gain(eff, ecop.mean_efficiency()),
            efficiency_over_mpc_only: percentage_gain(eff, mpc_only.mean_efficiency()),
            threats_over_ecop:        percentage_gain(thr, ecop.mean_threats_handled()),
            threats_over_mpc_only:    percentage_gain(thr, mpc_only.mean_threats_handled()),
        }
    }
}

/// `(value - baseline) / baseline * 100`, or `None` for a zero baseline.
pub fn percentage_gain(value: f64, baseline: f64) -> Option<f64> {
    (baseline != 0.0).then(|| (value - baseline) / baseline * 100.0)
}

/// One point of a threat-count sweep.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SweepPoint {
    pub threat_count:      u32,
    pub mean_efficiency:   f64,
    pub total_neutralized: u64,
}

/// Run PURE once per entry of `counts`, all with the same `seed`.
pub fn threat_sweep(config: &SimConfig, counts: &[u32], seed: u64) -> OutputResult<Vec<SweepPoint>> {
    counts
        .iter()
        .map(|&count| -> OutputResult<SweepPoint> {
            let mut cfg = config.clone().with_mode(Mode::Pure);
            cfg.threats.count = count;
            let mut sim = SimBuilder::standard(cfg)?.seed(seed).build()?;
            let metrics = sim.run(&mut NoopObserver)?;
            let point = SweepPoint {
                threat_count:      count,
                mean_efficiency:   mean(&metrics.energy_efficiency),
                total_neutralized: metrics.total_threats_handled(),
            };
            info!(threats = count, neutralized = point.total_neutralized, "sweep point");
            Ok(point)
        })
        .collect()
}

fn accumulate(sums: &mut [f64], values: impl Iterator<Item = f64>) {
    for (sum, v) in sums.iter_mut().zip(values) {
        *sum += v;
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
