//! Social security contributions.
//!
//! SSC is assessed on a weekly wage.  The payroll works in months, so a
//! monthly base is converted to its weekly equivalent, the weekly
//! contribution is looked up, and the result is converted back.  The
//! weekly figure is rounded to cents before the back-conversion; moving
//! that rounding changes the monthly amount.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::round_half_up;

/// Number of weeks and months in a year, used for period conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriods {
    pub weeks_per_year: Decimal,
    pub months_per_year: Decimal,
}

impl Default for PayPeriods {
    fn default() -> Self {
        Self {
            weeks_per_year: dec!(52),
            months_per_year: dec!(12),
        }
    }
}

/// Upper band for one birth cohort: wages up to `threshold` pay the
/// percentage rate, wages above it pay `amount` flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SscCap {
    pub threshold: Decimal,
    pub amount: Decimal,
}

/// The weekly contribution rule that applies to one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SscRule {
    pub flat_threshold: Decimal,
    pub flat_amount: Decimal,
    pub cap_threshold: Decimal,
    pub cap_rate: Decimal,
    pub cap_amount: Decimal,
}

impl SscRule {
    fn weekly(&self, weekly_wage: Decimal) -> Decimal {
        if weekly_wage <= self.flat_threshold {
            self.flat_amount
        } else if weekly_wage <= self.cap_threshold {
            round_half_up(weekly_wage * self.cap_rate)
        } else {
            self.cap_amount
        }
    }
}

/// Simplified Class 1 employee SSC schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SscSchedule {
    pub flat_threshold: Decimal,
    pub flat_amount: Decimal,
    pub cap_rate: Decimal,
    /// Employees born in or before this year use `older_cohort`.
    pub cohort_cutoff_year: i32,
    pub older_cohort: SscCap,
    pub younger_cohort: SscCap,
}

impl SscSchedule {
    pub fn malta_2026() -> Self {
        Self {
            flat_threshold: dec!(229.44),
            flat_amount: dec!(22.94),
            cap_rate: dec!(0.10),
            cohort_cutoff_year: 1961,
            older_cohort: SscCap {
                threshold: dec!(490.38),
                amount: dec!(49.04),
            },
            younger_cohort: SscCap {
                threshold: dec!(559.30),
                amount: dec!(55.93),
            },
        }
    }

    /// Selects the bracket rule for an employee's birth cohort.
    pub fn rule_for(&self, birth_year: i32) -> SscRule {
        let cap = if birth_year <= self.cohort_cutoff_year {
            self.older_cohort
        } else {
            self.younger_cohort
        };
        SscRule {
            flat_threshold: self.flat_threshold,
            flat_amount: self.flat_amount,
            cap_threshold: cap.threshold,
            cap_rate: self.cap_rate,
            cap_amount: cap.amount,
        }
    }

    /// Weekly contribution for a weekly wage.
    pub fn weekly_ssc(&self, weekly_wage: Decimal, birth_year: i32) -> Decimal {
        self.rule_for(birth_year).weekly(weekly_wage)
    }

    /// Monthly contribution for a monthly base wage.
    ///
    /// Goes monthly → weekly → weekly SSC (rounded) → monthly.  Returns
    /// `None` when a conversion overflows or a period count is zero.
    pub fn monthly_ssc_from_monthly_base(
        &self,
        base_monthly: Decimal,
        birth_year: i32,
        periods: PayPeriods,
    ) -> Option<Decimal> {
        let weekly_base = base_monthly
            .checked_mul(periods.months_per_year)?
            .checked_div(periods.weeks_per_year)?;
        let ssc_weekly = self.weekly_ssc(weekly_base, birth_year);
        ssc_weekly
            .checked_mul(periods.weeks_per_year)?
            .checked_div(periods.months_per_year)
    }

    /// Checks that every band yields a non-negative contribution.
    pub fn validate(&self) -> Result<(), String> {
        if self.cap_rate < Decimal::ZERO || self.cap_rate > Decimal::ONE {
            return Err("SSC cap rate must be between 0 and 1".to_string());
        }
        if self.flat_threshold < Decimal::ZERO || self.flat_amount < Decimal::ZERO {
            return Err("SSC flat threshold and amount must not be negative".to_string());
        }
        for (name, cap) in [("older", self.older_cohort), ("younger", self.younger_cohort)] {
            if cap.amount < Decimal::ZERO {
                return Err(format!("SSC {name} cohort cap amount is negative"));
            }
            if cap.threshold < self.flat_threshold {
                return Err(format!(
                    "SSC {name} cohort threshold {} is below the flat threshold {}",
                    cap.threshold, self.flat_threshold
                ));
            }
        }
        Ok(())
    }
}

impl Default for SscSchedule {
    fn default() -> Self {
        Self::malta_2026()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn low_wage_pays_flat_amount() {
        let ssc = SscSchedule::malta_2026();

        assert_eq!(ssc.weekly_ssc(dec!(100), 1995), dec!(22.94));
        assert_eq!(ssc.weekly_ssc(dec!(229.44), 1995), dec!(22.94));
        assert_eq!(ssc.weekly_ssc(Decimal::ZERO, 1950), dec!(22.94));
    }

    #[test]
    fn middle_band_pays_ten_percent_rounded() {
        let ssc = SscSchedule::malta_2026();

        assert_eq!(ssc.weekly_ssc(dec!(300), 1995), dec!(30.00));
        assert_eq!(ssc.weekly_ssc(dec!(461.538), 1995), dec!(46.15));
        assert_eq!(ssc.weekly_ssc(dec!(300.05), 1995), dec!(30.01));
    }

    #[test]
    fn younger_cohort_cap() {
        let ssc = SscSchedule::malta_2026();

        assert_eq!(ssc.weekly_ssc(dec!(559.30), 1962), dec!(55.93));
        assert_eq!(ssc.weekly_ssc(dec!(600), 1995), dec!(55.93));
    }

    #[test]
    fn older_cohort_cap() {
        let ssc = SscSchedule::malta_2026();

        assert_eq!(ssc.weekly_ssc(dec!(500), 1950), dec!(49.04));
        assert_eq!(ssc.weekly_ssc(dec!(500), 1961), dec!(49.04));
        // same wage is still in the percentage band for the younger cohort
        assert_eq!(ssc.weekly_ssc(dec!(500), 1962), dec!(50.00));
    }

    #[test]
    fn older_cohort_cap_boundary_is_inclusive() {
        let ssc = SscSchedule::malta_2026();

        // 490.38 * 0.10 = 49.038 through the percentage band
        assert_eq!(ssc.weekly_ssc(dec!(490.38), 1961), dec!(49.04));
        // one cent above goes to the flat cap
        assert_eq!(ssc.weekly_ssc(dec!(490.39), 1961), dec!(49.04));
        assert_eq!(ssc.weekly_ssc(dec!(490.39), 1962), dec!(49.04));
        assert_eq!(ssc.weekly_ssc(dec!(490.45), 1962), dec!(49.05));
    }

    #[test]
    fn flat_threshold_boundary() {
        let ssc = SscSchedule::malta_2026();

        assert_eq!(ssc.weekly_ssc(dec!(229.44), 1961), dec!(22.94));
        assert_eq!(ssc.weekly_ssc(dec!(229.45), 1995), dec!(22.95));
        assert_eq!(ssc.weekly_ssc(dec!(229.45), 1961), dec!(22.95));
    }

    #[test]
    fn rule_for_picks_cohort_by_birth_year() {
        let ssc = SscSchedule::malta_2026();

        assert_eq!(ssc.rule_for(1961).cap_threshold, dec!(490.38));
        assert_eq!(ssc.rule_for(1962).cap_threshold, dec!(559.30));
        assert_eq!(ssc.rule_for(1962).flat_amount, dec!(22.94));
    }

    #[test]
    fn monthly_round_trip_rounds_weekly_figure() {
        let ssc = SscSchedule::malta_2026();

        let monthly = ssc
            .monthly_ssc_from_monthly_base(dec!(2000), 1995, PayPeriods::default())
            .unwrap();

        // weekly base 461.538..., weekly SSC 46.15, monthly 46.15 * 52 / 12
        assert_eq!(monthly, dec!(2399.80) / dec!(12));
        assert_eq!(round_half_up(monthly), dec!(199.98));
    }

    #[test]
    fn monthly_flat_amount_for_low_base() {
        let ssc = SscSchedule::malta_2026();

        let monthly = ssc
            .monthly_ssc_from_monthly_base(dec!(800), 1995, PayPeriods::default())
            .unwrap();

        // 800 * 12 / 52 = 184.61 -> flat 22.94
        assert_eq!(round_half_up(monthly), dec!(99.41));
    }

    #[test]
    fn monthly_capped_amount_for_high_base() {
        let ssc = SscSchedule::malta_2026();

        let monthly = ssc
            .monthly_ssc_from_monthly_base(dec!(5000), 1960, PayPeriods::default())
            .unwrap();

        assert_eq!(round_half_up(monthly), dec!(212.51));
    }

    #[test]
    fn default_schedule_validates() {
        assert_eq!(SscSchedule::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_cohort_threshold_below_flat_threshold() {
        let mut ssc = SscSchedule::malta_2026();
        ssc.younger_cohort.threshold = dec!(200);

        assert!(ssc.validate().is_err());
    }

    #[test]
    fn validate_rejects_cap_rate_outside_unit_range() {
        let mut ssc = SscSchedule::malta_2026();
        ssc.cap_rate = dec!(-0.10);
        assert!(ssc.validate().is_err());

        ssc.cap_rate = dec!(1.10);
        assert!(ssc.validate().is_err());
    }

    #[test]
    fn monthly_conversion_overflow_is_none() {
        let ssc = SscSchedule::malta_2026();

        assert_eq!(
            ssc.monthly_ssc_from_monthly_base(Decimal::MAX, 1995, PayPeriods::default()),
            None
        );
    }

    #[test]
    fn zero_period_count_is_none() {
        let ssc = SscSchedule::malta_2026();
        let periods = PayPeriods {
            weeks_per_year: Decimal::ZERO,
            months_per_year: dec!(12),
        };

        assert_eq!(
            ssc.monthly_ssc_from_monthly_base(dec!(2000), 1995, periods),
            None
        );
    }
}
