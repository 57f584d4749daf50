mod config;

pub use config::ScoreConfig;

use super::domain::{LeaseOption, ScoredOption};

/// Stateless calculator applying the configured weighting to one option.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    config: ScoreConfig,
}

impl ScoreCalculator {
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Value-for-money score in [0, 100].
    ///
    /// Returns `None` when the retail price is missing or any input is
    /// non-positive; callers must treat that as "cannot rank", never as a
    /// worst score. Higher mileage never lowers the score, a higher monthly
    /// payment against the same retail price never raises it, and terms
    /// longer than the neutral reference length never raise it.
    pub fn calculate_lease_score(
        &self,
        monthly_price: u32,
        retail_price: Option<u32>,
        mileage_per_year: u32,
        period_months: u32,
    ) -> Option<u8> {
        let retail_price = retail_price.filter(|price| *price > 0)?;
        if monthly_price == 0 || mileage_per_year == 0 || period_months == 0 {
            return None;
        }

        let weight_sum =
            self.config.payment_weight + self.config.mileage_weight + self.config.period_weight;
        if weight_sum <= 0.0 {
            return None;
        }

        let payment_share = f64::from(monthly_price) / f64::from(retail_price) * 100.0;
        let payment_component = falling_ramp(
            payment_share,
            self.config.payment_share_floor_pct,
            self.config.payment_share_ceiling_pct,
        );

        let mileage_component = if self.config.mileage_ceiling_km == 0 {
            1.0
        } else {
            (f64::from(mileage_per_year) / f64::from(self.config.mileage_ceiling_km)).min(1.0)
        };

        let period_component = falling_ramp(
            f64::from(period_months),
            f64::from(self.config.neutral_period_months),
            f64::from(self.config.max_period_months),
        );

        let blended = (self.config.payment_weight * payment_component
            + self.config.mileage_weight * mileage_component
            + self.config.period_weight * period_component)
            / weight_sum;

        Some((blended.clamp(0.0, 1.0) * 100.0).round() as u8)
    }

    /// Scores every option in a listing's set against its retail price.
    pub fn score_options(
        &self,
        options: &[LeaseOption],
        retail_price: Option<u32>,
    ) -> Vec<ScoredOption> {
        options
            .iter()
            .map(|option| ScoredOption {
                option: *option,
                lease_score: self.calculate_lease_score(
                    option.monthly_price,
                    retail_price,
                    option.mileage_per_year,
                    option.period_months,
                ),
            })
            .collect()
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new(ScoreConfig::default())
    }
}

/// 1.0 at or below `best`, 0.0 at or beyond `worst`, linear in between.
/// Degenerates to a step when the configuration collapses the range.
fn falling_ramp(value: f64, best: f64, worst: f64) -> f64 {
    if worst <= best {
        return if value <= best { 1.0 } else { 0.0 };
    }
    ((worst - value) / (worst - best)).clamp(0.0, 1.0)
}
