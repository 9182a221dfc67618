//! Payroll computation engine.
//!
//! The `engine` module turns a [`PayrollInput`] into a
//! [`PayrollBreakdown`].  Every rate and table comes from the
//! [`PayrollPolicy`] the engine borrows, so the computation is a pure
//! function of the policy and the input.
//!
//! The steps run in a fixed order because later ones use earlier
//! intermediates:
//!
//! | Step | Quantity |
//! |------|----------|
//! | 1    | validation (card + roulette hours within table hours) |
//! | 2    | hourly rate from base |
//! | 3    | overtime gross, flat overtime tax, overtime net |
//! | 4    | night, SGC, performance, card and roulette bonuses |
//! | 5    | commitment bonus on the non-night bonuses |
//! | 6    | total bonuses |
//! | 7    | monthly SSC on the base wage only |
//! | 8    | progressive income tax, overtime excluded |
//! | 9    | gross, deductions and net |

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::models::{PayrollBreakdown, PayrollInput};
use crate::policy::PayrollPolicy;

struct Overtime {
    hourly_rate: Decimal,
    gross: Decimal,
    tax: Decimal,
    net: Decimal,
}

struct Bonuses {
    night: Decimal,
    sgc: Decimal,
    performance: Decimal,
    card: Decimal,
    roulette: Decimal,
    excl_night: Decimal,
    commitment: Decimal,
    total: Decimal,
}

/// Net salary calculator bound to one policy.
#[derive(Debug, Clone, Copy)]
pub struct PayrollEngine<'a> {
    policy: &'a PayrollPolicy,
}

impl<'a> PayrollEngine<'a> {
    pub fn new(policy: &'a PayrollPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &'a PayrollPolicy {
        self.policy
    }

    /// Computes the full breakdown for one request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if card plus roulette hours exceed
    /// table hours, if any amount or hour count is negative, or if an
    /// amount is too large to compute with.  No breakdown is produced
    /// in that case.
    pub fn compute(&self, input: &PayrollInput) -> Result<PayrollBreakdown, ValidationError> {
        let result = validate(input).and_then(|()| self.breakdown(input));
        if let Err(err) = &result {
            warn!(%err, "rejected payroll input");
        }
        result
    }

    fn breakdown(&self, input: &PayrollInput) -> Result<PayrollBreakdown, ValidationError> {
        let base = input.base_monthly_wage;
        let hourly_from_base = self.hourly_from_base(base)?;
        let overtime = self.overtime(hourly_from_base, input.overtime_hours)?;
        let bonuses = self.bonuses(input)?;

        let ssc_monthly = self
            .policy
            .ssc
            .monthly_ssc_from_monthly_base(base, input.birth_year, self.policy.periods)
            .ok_or_else(|| out_of_range("base_monthly_wage"))?;

        let months = self.policy.periods.months_per_year;
        let non_overtime_gross = add(base, bonuses.total, "non_overtime_gross")?;
        let chargeable_annual = non_overtime_gross
            .checked_sub(ssc_monthly)
            .and_then(|monthly| monthly.checked_mul(months))
            .ok_or_else(|| out_of_range("chargeable_annual"))?
            .max(Decimal::ZERO);
        let annual_tax = self
            .policy
            .tax_table
            .checked_annual_income_tax(chargeable_annual)
            .ok_or_else(|| out_of_range("annual_tax"))?;
        let monthly_tax = annual_tax
            .checked_div(months)
            .ok_or_else(|| out_of_range("monthly_tax"))?;

        let gross_total = add(non_overtime_gross, overtime.gross, "gross_total")?;
        let total_deductions = add(ssc_monthly, monthly_tax, "total_deductions")
            .and_then(|sum| add(sum, overtime.tax, "total_deductions"))?;
        let net_total = gross_total
            .checked_sub(total_deductions)
            .ok_or_else(|| out_of_range("net_total"))?;

        debug!(
            policy = %self.policy.name,
            %gross_total,
            %total_deductions,
            %net_total,
            "computed payroll breakdown"
        );

        Ok(PayrollBreakdown {
            hourly_from_base,
            overtime_hourly_rate: overtime.hourly_rate,
            base_gross: base,
            ssc_monthly,
            chargeable_annual,
            annual_tax,
            monthly_tax,
            overtime_gross: overtime.gross,
            overtime_tax: overtime.tax,
            overtime_net: overtime.net,
            night_bonus: bonuses.night,
            sgc_bonus: bonuses.sgc,
            performance_bonus: bonuses.performance,
            card_bonus: bonuses.card,
            roulette_bonus: bonuses.roulette,
            bonus_excl_night: bonuses.excl_night,
            commitment_tier: input.commitment_tier,
            commitment_bonus: bonuses.commitment,
            total_bonuses: bonuses.total,
            non_overtime_gross,
            gross_total,
            total_deductions,
            net_total,
        })
    }

    /// Base wage per standard hour; zero when the policy has no standard hours.
    fn hourly_from_base(&self, base: Decimal) -> Result<Decimal, ValidationError> {
        let hours = self.policy.monthly_standard_hours;
        if hours > Decimal::ZERO {
            base.checked_div(hours).ok_or_else(|| out_of_range("base_monthly_wage"))
        } else {
            Ok(Decimal::ZERO)
        }
    }

    fn overtime(
        &self,
        hourly_from_base: Decimal,
        hours: Decimal,
    ) -> Result<Overtime, ValidationError> {
        let hourly_rate = mul(
            hourly_from_base,
            self.policy.overtime_multiplier,
            "base_monthly_wage",
        )?;
        let gross = mul(hours, hourly_rate, "overtime_hours")?;
        let tax = mul(gross, self.policy.overtime_tax_rate, "overtime_hours")?;
        let net = gross
            .checked_sub(tax)
            .ok_or_else(|| out_of_range("overtime_hours"))?;
        Ok(Overtime {
            hourly_rate,
            gross,
            tax,
            net,
        })
    }

    fn bonuses(&self, input: &PayrollInput) -> Result<Bonuses, ValidationError> {
        let rates = &self.policy.bonus_rates;

        let night = mul(input.night_hours, rates.night_per_hour, "night_hours")?;
        // both apply to every table hour
        let sgc = mul(input.table_hours, rates.level_rate(input.sgc_level), "table_hours")?;
        let performance = mul(
            input.table_hours,
            rates.level_rate(input.performance_level),
            "table_hours",
        )?;
        let card = if input.card_eligible {
            mul(input.card_hours, rates.card_per_hour, "card_hours")?
        } else {
            Decimal::ZERO
        };
        let roulette = if input.roulette_eligible {
            mul(input.roulette_hours, rates.roulette_per_hour, "roulette_hours")?
        } else {
            Decimal::ZERO
        };

        let excl_night = [performance, card, roulette]
            .into_iter()
            .try_fold(sgc, |sum, bonus| add(sum, bonus, "bonus_excl_night"))?;
        let commitment = mul(excl_night, input.commitment_tier.rate(), "commitment_bonus")?;
        let total = add(night, excl_night, "total_bonuses")
            .and_then(|sum| add(sum, commitment, "total_bonuses"))?;

        Ok(Bonuses {
            night,
            sgc,
            performance,
            card,
            roulette,
            excl_night,
            commitment,
            total,
        })
    }
}

fn out_of_range(field: &'static str) -> ValidationError {
    ValidationError::AmountOutOfRange { field }
}

fn mul(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, ValidationError> {
    a.checked_mul(b).ok_or_else(|| out_of_range(field))
}

fn add(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, ValidationError> {
    a.checked_add(b).ok_or_else(|| out_of_range(field))
}

fn validate(input: &PayrollInput) -> Result<(), ValidationError> {
    // a sum too large to represent is above any table hours
    let exceeded = match input.card_hours.checked_add(input.roulette_hours) {
        Some(sum) => sum > input.table_hours,
        None => input.card_hours > Decimal::ZERO,
    };
    if exceeded {
        return Err(ValidationError::TableHoursExceeded {
            card_hours: input.card_hours,
            roulette_hours: input.roulette_hours,
            table_hours: input.table_hours,
        });
    }

    let fields = [
        ("base_monthly_wage", input.base_monthly_wage),
        ("overtime_hours", input.overtime_hours),
        ("night_hours", input.night_hours),
        ("table_hours", input.table_hours),
        ("card_hours", input.card_hours),
        ("roulette_hours", input.roulette_hours),
    ];
    match fields.into_iter().find(|(_, value)| *value < Decimal::ZERO) {
        Some((field, _)) => Err(ValidationError::NegativeValue { field }),
        None => Ok(()),
    }
}
