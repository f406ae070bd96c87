//! Traffic-factor generation.
//!
//! Every directed block carries a *traffic factor*: a multiplier on its
//! length giving the block's traffic cost.
//!
//! - `< 1.0` — lighter than usual traffic
//! - `= 1.0` — normal conditions
//! - `> 1.0` — congestion
//!
//! Factors are always clamped to `[TRAFFIC_FACTOR_MIN, TRAFFIC_FACTOR_MAX]`.
//!
//! The graph builder never samples randomness itself; it pulls factors from
//! an injected [`TrafficSource`].  Production maps use [`GaussianTraffic`];
//! tests usually pass a [`ConstantTraffic`] or a closure.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::{RnError, RnResult, TrafficModel};

/// Lower clamp for sampled traffic factors.
pub const TRAFFIC_FACTOR_MIN: f64 = 0.5;

/// Upper clamp for sampled traffic factors.
pub const TRAFFIC_FACTOR_MAX: f64 = 1.5;

/// Clamp `factor` into `[TRAFFIC_FACTOR_MIN, TRAFFIC_FACTOR_MAX]`.
///
/// NaN maps to the lower bound so a misbehaving source can never poison
/// path costs.
#[inline]
pub fn clamp_traffic_factor(factor: f64) -> f64 {
    if factor.is_nan() {
        return TRAFFIC_FACTOR_MIN;
    }
    factor.clamp(TRAFFIC_FACTOR_MIN, TRAFFIC_FACTOR_MAX)
}

// ── TrafficSource ─────────────────────────────────────────────────────────────

/// Supplier of per-block traffic factors.
///
/// Called once per physical block, in block order, during network
/// construction.  Values outside the clamp range are clamped by the caller.
pub trait TrafficSource {
    fn traffic_factor(&mut self) -> f64;
}

impl<F: FnMut() -> f64> TrafficSource for F {
    #[inline]
    fn traffic_factor(&mut self) -> f64 {
        self()
    }
}

/// Always yields the same factor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstantTraffic(pub f64);

impl TrafficSource for ConstantTraffic {
    #[inline]
    fn traffic_factor(&mut self) -> f64 {
        clamp_traffic_factor(self.0)
    }
}

// ── GaussianTraffic ───────────────────────────────────────────────────────────

/// Gaussian traffic factors: `Normal(mean, std_dev)` clamped to
/// `[0.5, 1.5]`.  The default model is `Normal(1.0, 0.2)`.
///
/// Seeded runs are reproducible: the same seed and model always produce the
/// same factor sequence.
pub struct GaussianTraffic {
    rng:    SmallRng,
    normal: Normal<f64>,
}

impl GaussianTraffic {
    /// Deterministic generator for `model`, seeded from `seed`.
    pub fn seeded(model: TrafficModel, seed: u64) -> RnResult<Self> {
        Self::with_rng(model, SmallRng::seed_from_u64(seed))
    }

    /// Non-deterministic generator seeded from OS entropy.
    pub fn from_entropy(model: TrafficModel) -> RnResult<Self> {
        Self::with_rng(model, SmallRng::from_entropy())
    }

    fn with_rng(model: TrafficModel, rng: SmallRng) -> RnResult<Self> {
        let normal = Normal::new(model.mean, model.std_dev)
            .map_err(|e| RnError::Config(format!("invalid traffic model {model:?}: {e}")))?;
        Ok(GaussianTraffic { rng, normal })
    }
}

impl TrafficSource for GaussianTraffic {
    #[inline]
    fn traffic_factor(&mut self) -> f64 {
        clamp_traffic_factor(self.normal.sample(&mut self.rng))
    }
}
