use anyhow::{Context, Result, anyhow};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One rung of the duration ladder: loans of up to `max_months` months
/// carry `annual_rate` (a fraction, e.g. `0.10` for 10%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTier {
    pub max_months: u32,
    pub annual_rate: Decimal,
}

impl RateTier {
    pub fn new(max_months: u32, annual_rate: Decimal) -> Self {
        Self {
            max_months,
            annual_rate,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RateTableConfig {
    tiers: Vec<RateTier>,
}

/// Duration-tiered annual interest rates.
///
/// Lookup uses ceiling semantics: the first tier whose `max_months` is at
/// least the requested duration wins, and anything longer than the last
/// threshold falls through to the last tier. The lookup is therefore total
/// over every duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    tiers: Vec<RateTier>,
}

impl RateTable {
    /// Builds a table from tiers in any order.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no tiers, if two tiers share a
    /// threshold or if any rate is negative.
    pub fn new(mut tiers: Vec<RateTier>) -> Result<Self> {
        if tiers.is_empty() {
            return Err(anyhow!("Got empty rate table, which isn't allowed"));
        }
        tiers.sort_by_key(|tier| tier.max_months);

        let mut prev: Option<u32> = None;
        for (i, tier) in tiers.iter().enumerate() {
            if tier.annual_rate < Decimal::ZERO {
                return Err(anyhow!(
                    "Tier {} (up to {} months) has negative rate {}",
                    i,
                    tier.max_months,
                    tier.annual_rate
                ));
            }
            if prev == Some(tier.max_months) {
                return Err(anyhow!(
                    "Tier {} repeats the {} month threshold",
                    i,
                    tier.max_months
                ));
            }
            prev = Some(tier.max_months);
        }

        Ok(Self { tiers })
    }

    /// The ladder offered to borrowers: 3, 6, 12 and 24 months.
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                RateTier::new(3, dec!(0.05)),
                RateTier::new(6, dec!(0.075)),
                RateTier::new(12, dec!(0.10)),
                RateTier::new(24, dec!(0.125)),
            ],
        }
    }

    /// Loads a table from `{"tiers": [{"max_months": 3, "annual_rate": "0.05"}, ...]}`.
    pub fn from_json(input: &str) -> Result<Self> {
        let config: RateTableConfig =
            serde_json::from_str(input).context("Failed to parse rate table")?;
        Self::new(config.tiers).context("Rate table failed validation")
    }

    pub fn tiers(&self) -> &[RateTier] {
        &self.tiers
    }

    /// Annual rate for a loan of `duration_months`.
    pub fn rate_for(&self, duration_months: u32) -> Decimal {
        let idx = self
            .tiers
            .partition_point(|tier| tier.max_months < duration_months)
            .min(self.tiers.len() - 1);
        self.tiers[idx].annual_rate
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}
