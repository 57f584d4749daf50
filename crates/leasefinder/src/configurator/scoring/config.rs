use serde::{Deserialize, Serialize};

/// Business weighting behind the lease score.
///
/// The literal coefficients are a commercial parameter, so they live here
/// rather than in code; the calculator's monotonicity guarantees hold for
/// any non-negative weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Monthly payment as a percentage of retail considered best-in-market;
    /// payments at or below this share earn the full payment component.
    pub payment_share_floor_pct: f64,
    /// Payment share at or above which the payment component is zero.
    pub payment_share_ceiling_pct: f64,
    /// Annual mileage allowance at which the mileage component saturates.
    pub mileage_ceiling_km: u32,
    /// Contract length up to which term flexibility is not penalized.
    pub neutral_period_months: u32,
    /// Contract length at or beyond which the term component is zero.
    pub max_period_months: u32,
    pub payment_weight: f64,
    pub mileage_weight: f64,
    pub period_weight: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            payment_share_floor_pct: 0.8,
            payment_share_ceiling_pct: 2.2,
            mileage_ceiling_km: 30_000,
            neutral_period_months: 12,
            max_period_months: 48,
            payment_weight: 0.55,
            mileage_weight: 0.25,
            period_weight: 0.20,
        }
    }
}

impl ScoreConfig {
    /// Replaces the three component weights, e.g. from deployment
    /// configuration. Weights are relative; they need not sum to one.
    pub fn with_weights(mut self, payment: f64, mileage: f64, period: f64) -> Self {
        self.payment_weight = payment;
        self.mileage_weight = mileage;
        self.period_weight = period;
        self
    }
}
