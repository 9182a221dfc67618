//! Progressive income tax.
//!
//! The `tax` module holds the bracketed rate/subtract table used to turn
//! annual chargeable income into annual income tax.  A table is plain
//! data: an ordered list of [`TaxBracket`]s evaluated by a first-match
//! scan.  The default table is the Maltese 2026 schedule for single
//! filers.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One row of a rate/subtract tax table.
///
/// Tax inside the bracket is `chargeable * rate - subtract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of the bracket.  `None` means unbounded and
    /// is only valid on the last row.
    pub upper_bound: Option<Decimal>,
    /// Marginal rate as a fraction (0.25 for 25%).
    pub rate: Decimal,
    /// Amount subtracted from `chargeable * rate`.
    pub subtract: Decimal,
}

impl TaxBracket {
    fn covers(&self, amount: Decimal) -> bool {
        self.upper_bound.map_or(true, |upper| amount <= upper)
    }

    fn tax_on(&self, amount: Decimal) -> Option<Decimal> {
        amount.checked_mul(self.rate)?.checked_sub(self.subtract)
    }
}

/// Ordered sequence of [`TaxBracket`]s with strictly increasing bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTable {
    pub brackets: Vec<TaxBracket>,
}

impl TaxTable {
    /// Maltese income tax rates for single filers, 2026.
    pub fn malta_2026_single() -> Self {
        Self {
            brackets: vec![
                TaxBracket {
                    upper_bound: Some(dec!(12000)),
                    rate: dec!(0.00),
                    subtract: dec!(0),
                },
                TaxBracket {
                    upper_bound: Some(dec!(16000)),
                    rate: dec!(0.15),
                    subtract: dec!(1800),
                },
                TaxBracket {
                    upper_bound: Some(dec!(60000)),
                    rate: dec!(0.25),
                    subtract: dec!(3400),
                },
                TaxBracket {
                    upper_bound: None,
                    rate: dec!(0.35),
                    subtract: dec!(9400),
                },
            ],
        }
    }

    /// Annual income tax due on `chargeable_annual`.
    ///
    /// Zero or negative income owes nothing.  The first bracket whose
    /// bound covers the amount is used; if none does, the last bracket
    /// applies.  The result never goes below zero, even where the
    /// subtract term outweighs the product.  A product too large for a
    /// [`Decimal`] saturates at [`Decimal::MAX`]; use
    /// [`checked_annual_income_tax`](Self::checked_annual_income_tax) to
    /// detect that instead.
    pub fn annual_income_tax(&self, chargeable_annual: Decimal) -> Decimal {
        self.checked_annual_income_tax(chargeable_annual).unwrap_or(Decimal::MAX)
    }

    /// Like [`annual_income_tax`](Self::annual_income_tax), but `None` on
    /// overflow.
    pub fn checked_annual_income_tax(&self, chargeable_annual: Decimal) -> Option<Decimal> {
        if chargeable_annual <= Decimal::ZERO {
            return Some(Decimal::ZERO);
        }

        let bracket = self
            .brackets
            .iter()
            .find(|b| b.covers(chargeable_annual))
            .or_else(|| self.brackets.last());

        match bracket {
            Some(b) => b.tax_on(chargeable_annual).map(|tax| tax.max(Decimal::ZERO)),
            None => Some(Decimal::ZERO),
        }
    }

    /// Checks the structural rules a table must satisfy before use.
    pub fn validate(&self) -> Result<(), String> {
        let Some(last) = self.brackets.last() else {
            return Err("tax table has no brackets".to_string());
        };
        if last.upper_bound.is_some() {
            return Err("last tax bracket must be unbounded".to_string());
        }

        let mut previous: Option<Decimal> = None;
        for (i, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(format!("tax bracket {i} rate must be between 0 and 1"));
            }
            if bracket.subtract < Decimal::ZERO {
                return Err(format!("tax bracket {i} has a negative subtract"));
            }
            if i + 1 == self.brackets.len() {
                break;
            }
            let Some(upper) = bracket.upper_bound else {
                return Err(format!("tax bracket {i} is unbounded but not last"));
            };
            if previous.is_some_and(|p| upper <= p) {
                return Err(format!("tax bracket {i} bound {upper} is not increasing"));
            }
            previous = Some(upper);
        }
        Ok(())
    }
}

impl Default for TaxTable {
    fn default() -> Self {
        Self::malta_2026_single()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn zero_and_negative_income_owe_nothing() {
        let table = TaxTable::malta_2026_single();

        assert_eq!(table.annual_income_tax(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(table.annual_income_tax(dec!(-0.01)), Decimal::ZERO);
        assert_eq!(table.annual_income_tax(dec!(-50000)), Decimal::ZERO);
    }

    #[test]
    fn bracket_bounds_are_inclusive() {
        let table = TaxTable::malta_2026_single();

        assert_eq!(table.annual_income_tax(dec!(12000)), dec!(0));
        assert_eq!(table.annual_income_tax(dec!(16000)), dec!(600));
        assert_eq!(table.annual_income_tax(dec!(60000)), dec!(11600));
    }

    #[test]
    fn top_bracket_is_unbounded() {
        let table = TaxTable::malta_2026_single();

        assert_eq!(table.annual_income_tax(dec!(100000)), dec!(25600));
    }

    #[test]
    fn second_bracket_start_does_not_go_negative() {
        let table = TaxTable::malta_2026_single();

        // 12000.01 * 0.15 - 1800 = 0.0015
        assert_eq!(table.annual_income_tax(dec!(12000.01)), dec!(0.0015));
    }

    #[test]
    fn subtract_larger_than_product_clamps_to_zero() {
        let table = TaxTable {
            brackets: vec![TaxBracket {
                upper_bound: None,
                rate: dec!(0.10),
                subtract: dec!(500),
            }],
        };

        assert_eq!(table.annual_income_tax(dec!(1000)), Decimal::ZERO);
    }

    #[test]
    fn exhausted_scan_uses_last_bracket() {
        let table = TaxTable {
            brackets: vec![
                TaxBracket {
                    upper_bound: Some(dec!(1000)),
                    rate: dec!(0.10),
                    subtract: dec!(0),
                },
                TaxBracket {
                    upper_bound: Some(dec!(2000)),
                    rate: dec!(0.20),
                    subtract: dec!(100),
                },
            ],
        };

        assert_eq!(table.annual_income_tax(dec!(5000)), dec!(900));
    }

    #[test]
    fn empty_table_owes_nothing() {
        let table = TaxTable { brackets: vec![] };

        assert_eq!(table.annual_income_tax(dec!(50000)), Decimal::ZERO);
    }

    #[test]
    fn tax_is_non_decreasing_and_non_negative() {
        let table = TaxTable::malta_2026_single();
        let mut previous = Decimal::ZERO;
        let mut income = dec!(-1000);

        while income <= dec!(120000) {
            let tax = table.annual_income_tax(income);
            assert!(tax >= Decimal::ZERO, "negative tax at {income}");
            assert!(tax >= previous, "tax dropped at {income}: {tax} < {previous}");
            previous = tax;
            income += dec!(250.25);
        }
    }

    #[test]
    fn default_table_validates() {
        assert_eq!(TaxTable::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_bounded_last_bracket() {
        let mut table = TaxTable::malta_2026_single();
        table.brackets.pop();

        assert!(table.validate().is_err());
    }

    #[test]
    fn validate_rejects_unordered_bounds() {
        let mut table = TaxTable::malta_2026_single();
        table.brackets.swap(0, 1);

        assert!(table.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_table() {
        assert!(TaxTable { brackets: vec![] }.validate().is_err());
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut table = TaxTable::malta_2026_single();
        table.brackets[3].rate = dec!(1.5);

        assert!(table.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_subtract() {
        let mut table = TaxTable::malta_2026_single();
        table.brackets[1].subtract = dec!(-1);

        assert!(table.validate().is_err());
    }

    #[test]
    fn overflowing_product_is_detected() {
        let table = TaxTable {
            brackets: vec![TaxBracket {
                upper_bound: None,
                rate: dec!(2),
                subtract: dec!(0),
            }],
        };

        assert_eq!(table.checked_annual_income_tax(Decimal::MAX), None);
        assert_eq!(table.annual_income_tax(Decimal::MAX), Decimal::MAX);
        assert_eq!(table.checked_annual_income_tax(dec!(100)), Some(dec!(200)));
    }
}
