//! Data models for the wage calculator.
//!
//! The `models` module defines the serialisable request and result
//! types.  A [`PayrollInput`] is what a form collects from the user; a
//! [`PayrollBreakdown`] is everything needed to show the itemized
//! result.  Both derive `Serialize` and `Deserialize` so they can be
//! transmitted over the HTTP API unchanged.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-hour rate tier used for the SGC and performance bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RateLevel {
    #[default]
    #[serde(rename = "level_1")]
    Level1,
    #[serde(rename = "level_2")]
    Level2,
}

impl RateLevel {
    pub const ALL: [RateLevel; 2] = [RateLevel::Level1, RateLevel::Level2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Level1 => "level_1",
            Self::Level2 => "level_2",
        }
    }
}

impl fmt::Display for RateLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level1 => f.write_str("Level 1"),
            Self::Level2 => f.write_str("Level 2"),
        }
    }
}

/// A level, tier or language name that is not one of the accepted values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for RateLevel {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "level_1" | "level1" => Ok(Self::Level1),
            "2" | "level_2" | "level2" => Ok(Self::Level2),
            _ => Err(UnknownChoice {
                kind: "rate level",
                value: s.to_string(),
            }),
        }
    }
}

/// Commitment percentage applied to the non-night bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CommitmentTier {
    #[default]
    #[serde(rename = "10%")]
    Ten,
    #[serde(rename = "20%")]
    Twenty,
    #[serde(rename = "30%")]
    Thirty,
    #[serde(rename = "40%")]
    Forty,
    #[serde(rename = "50%")]
    Fifty,
}

impl CommitmentTier {
    pub const ALL: [CommitmentTier; 5] = [
        CommitmentTier::Ten,
        CommitmentTier::Twenty,
        CommitmentTier::Thirty,
        CommitmentTier::Forty,
        CommitmentTier::Fifty,
    ];

    pub fn percent(&self) -> u8 {
        match self {
            Self::Ten => 10,
            Self::Twenty => 20,
            Self::Thirty => 30,
            Self::Forty => 40,
            Self::Fifty => 50,
        }
    }

    /// The tier as a fraction (0.10 for 10%).
    pub fn rate(&self) -> Decimal {
        match self {
            Self::Ten => dec!(0.10),
            Self::Twenty => dec!(0.20),
            Self::Thirty => dec!(0.30),
            Self::Forty => dec!(0.40),
            Self::Fifty => dec!(0.50),
        }
    }
}

impl fmt::Display for CommitmentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

impl FromStr for CommitmentTier {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('%').trim_end_matches('%');
        Self::ALL
            .into_iter()
            .find(|tier| digits == tier.percent().to_string())
            .ok_or_else(|| UnknownChoice {
                kind: "commitment tier",
                value: s.to_string(),
            })
    }
}

/// Everything the form collects for one calculation.
///
/// Hour counts and eligibility flags that a form leaves out default to
/// zero / unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Bonus-free gross monthly wage.
    pub base_monthly_wage: Decimal,
    /// Only used to pick the SSC cohort.
    pub birth_year: i32,
    #[serde(default)]
    pub overtime_hours: Decimal,
    #[serde(default)]
    pub night_hours: Decimal,
    /// Hours at a gaming table; basis for the SGC, performance, card and
    /// roulette bonuses.
    #[serde(default)]
    pub table_hours: Decimal,
    #[serde(default)]
    pub card_hours: Decimal,
    #[serde(default)]
    pub roulette_hours: Decimal,
    #[serde(default)]
    pub card_eligible: bool,
    #[serde(default)]
    pub roulette_eligible: bool,
    #[serde(default)]
    pub sgc_level: RateLevel,
    #[serde(default)]
    pub performance_level: RateLevel,
    #[serde(default)]
    pub commitment_tier: CommitmentTier,
}

impl PayrollInput {
    /// An input with only a base wage and birth year; everything else
    /// zero, unset, or the lowest tier.
    pub fn new(base_monthly_wage: Decimal, birth_year: i32) -> Self {
        Self {
            base_monthly_wage,
            birth_year,
            overtime_hours: Decimal::ZERO,
            night_hours: Decimal::ZERO,
            table_hours: Decimal::ZERO,
            card_hours: Decimal::ZERO,
            roulette_hours: Decimal::ZERO,
            card_eligible: false,
            roulette_eligible: false,
            sgc_level: RateLevel::Level1,
            performance_level: RateLevel::Level1,
            commitment_tier: CommitmentTier::Ten,
        }
    }
}

/// The itemized result of one calculation.
///
/// Amounts are monthly and kept at full precision; round them only for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    pub hourly_from_base: Decimal,
    pub overtime_hourly_rate: Decimal,

    pub base_gross: Decimal,
    pub ssc_monthly: Decimal,
    pub chargeable_annual: Decimal,
    pub annual_tax: Decimal,
    pub monthly_tax: Decimal,

    pub overtime_gross: Decimal,
    pub overtime_tax: Decimal,
    pub overtime_net: Decimal,

    pub night_bonus: Decimal,
    pub sgc_bonus: Decimal,
    pub performance_bonus: Decimal,
    pub card_bonus: Decimal,
    pub roulette_bonus: Decimal,
    /// SGC + performance + card + roulette; the commitment base.
    pub bonus_excl_night: Decimal,
    pub commitment_tier: CommitmentTier,
    pub commitment_bonus: Decimal,
    pub total_bonuses: Decimal,

    pub non_overtime_gross: Decimal,
    pub gross_total: Decimal,
    pub total_deductions: Decimal,
    /// Not clamped; negative when deductions exceed gross.
    pub net_total: Decimal,
}
