//! Map construction configuration.
//!
//! Typically loaded from a JSON file by the application crate (enable the
//! `serde` feature) and passed to `rn_graph::RoadMap::load`.

use crate::rng::{TRAFFIC_FACTOR_MAX, TRAFFIC_FACTOR_MIN};
use crate::{GaussianTraffic, RnError, RnResult};

// ── TrafficModel ──────────────────────────────────────────────────────────────

/// Parameters of the Gaussian traffic-factor distribution.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrafficModel {
    /// Distribution mean.  Default: 1.0 (normal conditions).
    pub mean: f64,
    /// Standard deviation.  Default: 0.2.
    pub std_dev: f64,
}

impl Default for TrafficModel {
    fn default() -> Self {
        Self { mean: 1.0, std_dev: 0.2 }
    }
}

// ── MapConfig ─────────────────────────────────────────────────────────────────

/// Top-level map configuration.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    /// Traffic RNG seed.  `None` seeds from OS entropy, so every load draws
    /// fresh traffic; `Some` makes traffic (and therefore `fastest_path`)
    /// reproducible.
    pub seed: Option<u64>,

    pub traffic: TrafficModel,
}

impl MapConfig {
    /// Config with a fixed seed and the default traffic model.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    /// Reject parameter combinations that would produce meaningless factors.
    pub fn validate(&self) -> RnResult<()> {
        let TrafficModel { mean, std_dev } = self.traffic;
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(RnError::Config(format!(
                "traffic std_dev must be finite and non-negative, got {std_dev}"
            )));
        }
        if !(TRAFFIC_FACTOR_MIN..=TRAFFIC_FACTOR_MAX).contains(&mean) {
            return Err(RnError::Config(format!(
                "traffic mean must lie in [{TRAFFIC_FACTOR_MIN}, {TRAFFIC_FACTOR_MAX}], got {mean}"
            )));
        }
        Ok(())
    }

    /// Build the traffic generator described by this config.
    pub fn traffic_source(&self) -> RnResult<GaussianTraffic> {
        self.validate()?;
        match self.seed {
            Some(seed) => GaussianTraffic::seeded(self.traffic, seed),
            None => GaussianTraffic::from_entropy(self.traffic),
        }
    }
}
