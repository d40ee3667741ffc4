//! Aggregation of trial results into a Monte Carlo report.
//!
//! Means divide running sums by the trial count; the spread statistics
//! (sample variance, 95% confidence half-width, percentiles) need the full
//! per-trial total distribution, so every trial total is retained.

use serde::Serialize;

use crate::engine::{DamageBreakdown, TrialResult};

/// Mean cast counts per trial, per category.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MeanCasts {
    pub basic: f64,
    pub skill1: f64,
    pub skill2: f64,
    pub skill3: f64,
    pub ult: f64,
}

/// The Monte Carlo summary over all trials. Derived, read-only.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub trials: u32,
    /// Requested ticks per trial (extensions can push individual trials
    /// past this; see `mean_ticks`).
    pub ticks: u64,
    pub seed: u64,

    /// Per-category mean damage.
    pub mean_damage: DamageBreakdown,
    pub mean_total: f64,
    /// Sample standard deviation of the per-trial totals.
    pub std_total: f64,
    /// 95% confidence half-width of the mean (normal approximation).
    pub ci95_half_width: f64,
    pub p05: f64,
    pub p50: f64,
    pub p95: f64,

    pub mean_casts: MeanCasts,
    pub mean_ticks: f64,
    pub mean_damage_per_tick: f64,
}

impl SimReport {
    pub fn from_trials(results: &[TrialResult], ticks: u64, seed: u64) -> Self {
        let trials = results.len() as u32;
        let n = trials as f64;

        let mut damage_sum = DamageBreakdown::default();
        let mut casts_sum = MeanCasts::default();
        let mut ticks_sum = 0u64;
        let mut totals: Vec<f64> = Vec::with_capacity(results.len());

        for result in results {
            damage_sum.accumulate(&result.damage);
            casts_sum.basic += result.casts.basic as f64;
            casts_sum.skill1 += result.casts.skill1 as f64;
            casts_sum.skill2 += result.casts.skill2 as f64;
            casts_sum.skill3 += result.casts.skill3 as f64;
            casts_sum.ult += result.casts.ult as f64;
            ticks_sum += result.ticks_run;
            totals.push(result.damage.total());
        }

        let mean_damage = damage_sum.scaled(1.0 / n);
        let mean_total = mean_damage.total();

        let std_total = if trials >= 2 {
            let var = totals
                .iter()
                .map(|&x| (x - mean_total) * (x - mean_total))
                .sum::<f64>()
                / (n - 1.0);
            var.sqrt()
        } else {
            0.0
        };
        let ci95_half_width = if trials >= 2 {
            1.96 * std_total / n.sqrt()
        } else {
            0.0
        };

        totals.sort_by(|a, b| a.total_cmp(b));
        let p05 = percentile(&totals, 5.0);
        let p50 = percentile(&totals, 50.0);
        let p95 = percentile(&totals, 95.0);

        let mean_ticks = ticks_sum as f64 / n;
        let mean_damage_per_tick = if ticks > 0 {
            mean_total / ticks as f64
        } else {
            0.0
        };

        Self {
            trials,
            ticks,
            seed,
            mean_damage,
            mean_total,
            std_total,
            ci95_half_width,
            p05,
            p50,
            p95,
            mean_casts: MeanCasts {
                basic: casts_sum.basic / n,
                skill1: casts_sum.skill1 / n,
                skill2: casts_sum.skill2 / n,
                skill3: casts_sum.skill3 / n,
                ult: casts_sum.ult / n,
            },
            mean_ticks,
            mean_damage_per_tick,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    DAMAGE SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Trials: {}   Ticks: {}   Seed: {}\n\n",
            self.trials, self.ticks, self.seed
        ));

        report.push_str("── TOTALS ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Mean Total Damage:  {:.3}\n", self.mean_total));
        report.push_str(&format!("  Std Dev (sample):   {:.3}\n", self.std_total));
        report.push_str(&format!(
            "  95% CI (mean):      ±{:.3}\n",
            self.ci95_half_width
        ));
        report.push_str(&format!(
            "  Damage per Tick:    {:.3}\n",
            self.mean_damage_per_tick
        ));
        if self.mean_ticks > self.ticks as f64 {
            report.push_str(&format!(
                "  Mean Ticks Run:     {:.3} (extended)\n",
                self.mean_ticks
            ));
        }
        report.push('\n');

        report.push_str("── BREAKDOWN (mean damage per trial) ────────────────────────────\n");
        let rows = [
            ("basic", self.mean_damage.basic, self.mean_casts.basic),
            ("skill1", self.mean_damage.skill1, self.mean_casts.skill1),
            ("skill2", self.mean_damage.skill2, self.mean_casts.skill2),
            ("skill3", self.mean_damage.skill3, self.mean_casts.skill3),
            ("ult", self.mean_damage.ult, self.mean_casts.ult),
        ];
        for (name, damage, casts) in rows {
            let share = if self.mean_total > 0.0 {
                damage / self.mean_total * 100.0
            } else {
                0.0
            };
            report.push_str(&format!(
                "  {name:<7} {damage:>16.3}  ({share:>5.1}%)  casts {casts:>10.3}\n"
            ));
        }
        report.push('\n');

        report.push_str("── PERCENTILES (total damage) ───────────────────────────────────\n");
        report.push_str(&format!("  p05: {:.3}\n", self.p05));
        report.push_str(&format!("  p50: {:.3}\n", self.p50));
        report.push_str(&format!("  p95: {:.3}\n", self.p95));

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Linear-interpolated percentile over a sorted slice; `q` in 0..=100.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if q <= 0.0 {
        return sorted[0];
    }
    if q >= 100.0 {
        return sorted[sorted.len() - 1];
    }
    let pos = (sorted.len() - 1) as f64 * (q / 100.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}
