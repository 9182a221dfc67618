//! Payroll policy: every rate, constant and table in one value.
//!
//! A [`PayrollPolicy`] is built once at startup and handed to the
//! engine by reference.  The default is the Maltese 2026 policy for a
//! single filer.  An alternative can be loaded from a JSON file with the
//! same shape as the serialised default, which is how a new year's
//! figures are tried without a rebuild.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::contribution::{PayPeriods, SscSchedule};
use crate::error::PolicyError;
use crate::models::RateLevel;
use crate::tax::TaxTable;

/// Per-hour bonus rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusRates {
    pub night_per_hour: Decimal,
    pub card_per_hour: Decimal,
    pub roulette_per_hour: Decimal,
    pub level_1_per_hour: Decimal,
    pub level_2_per_hour: Decimal,
}

impl Default for BonusRates {
    fn default() -> Self {
        Self {
            night_per_hour: dec!(2.0),
            card_per_hour: dec!(1.0),
            roulette_per_hour: dec!(1.0),
            level_1_per_hour: dec!(1.0),
            level_2_per_hour: dec!(2.5),
        }
    }
}

impl BonusRates {
    pub fn level_rate(&self, level: RateLevel) -> Decimal {
        match level {
            RateLevel::Level1 => self.level_1_per_hour,
            RateLevel::Level2 => self.level_2_per_hour,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPolicy {
    /// Human-readable identifier, e.g. `"MT-2026-single"`.
    pub name: String,
    /// Hours in a standard working month; the base wage divided by this
    /// gives the hourly rate.
    pub monthly_standard_hours: Decimal,
    pub periods: PayPeriods,
    pub overtime_multiplier: Decimal,
    /// Flat rate withheld on overtime, outside the progressive table.
    pub overtime_tax_rate: Decimal,
    pub bonus_rates: BonusRates,
    pub tax_table: TaxTable,
    pub ssc: SscSchedule,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            name: "MT-2026-single".to_string(),
            monthly_standard_hours: dec!(173.33),
            periods: PayPeriods::default(),
            overtime_multiplier: dec!(1.5),
            overtime_tax_rate: dec!(0.25),
            bonus_rates: BonusRates::default(),
            tax_table: TaxTable::malta_2026_single(),
            ssc: SscSchedule::malta_2026(),
        }
    }
}

impl PayrollPolicy {
    /// Rejects policies the engine cannot evaluate or that would produce
    /// negative bonuses, taxes or contributions.
    ///
    /// A zero `monthly_standard_hours` is accepted; the engine treats it
    /// as "no hourly rate".
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.periods.weeks_per_year <= Decimal::ZERO
            || self.periods.months_per_year <= Decimal::ZERO
        {
            return Err(PolicyError::Invalid(
                "weeks and months per year must be positive".to_string(),
            ));
        }

        let non_negative = [
            ("monthly_standard_hours", self.monthly_standard_hours),
            ("overtime_multiplier", self.overtime_multiplier),
            ("night_per_hour", self.bonus_rates.night_per_hour),
            ("card_per_hour", self.bonus_rates.card_per_hour),
            ("roulette_per_hour", self.bonus_rates.roulette_per_hour),
            ("level_1_per_hour", self.bonus_rates.level_1_per_hour),
            ("level_2_per_hour", self.bonus_rates.level_2_per_hour),
        ];
        if let Some((field, _)) = non_negative.into_iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(PolicyError::Invalid(format!("{field} must not be negative")));
        }
        if self.overtime_tax_rate < Decimal::ZERO || self.overtime_tax_rate > Decimal::ONE {
            return Err(PolicyError::Invalid(
                "overtime_tax_rate must be between 0 and 1".to_string(),
            ));
        }

        self.tax_table.validate().map_err(PolicyError::Invalid)?;
        self.ssc.validate().map_err(PolicyError::Invalid)
    }

    /// Load a policy from a JSON file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self, PolicyError> {
        let data = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy: PayrollPolicy =
            serde_json::from_str(&data).map_err(|source| PolicyError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if let Err(err) = policy.validate() {
            warn!(path = %path.display(), %err, "rejecting payroll policy");
            return Err(err);
        }
        info!(path = %path.display(), policy = %policy.name, "loaded payroll policy");
        Ok(policy)
    }

    /// The policy at `path` when given, otherwise the built-in default.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, PolicyError> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::default()),
        }
    }
}
