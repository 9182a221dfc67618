//! Itemized text rendering of a [`PayrollBreakdown`].
//!
//! The report mirrors what the salary form shows after a calculation:
//! the estimated net, then breakdown, bonus and total sections.  Labels
//! exist in English and Turkish.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CommitmentTier, PayrollBreakdown, UnknownChoice};
use crate::money::format_eur;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLanguage {
    #[default]
    En,
    Tr,
}

impl FromStr for ReportLanguage {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "tr" | "turkish" | "türkçe" => Ok(Self::Tr),
            _ => Err(UnknownChoice {
                kind: "language",
                value: s.to_string(),
            }),
        }
    }
}

struct Labels {
    headline: &'static str,
    breakdown: &'static str,
    base: &'static str,
    ssc: &'static str,
    income_tax: &'static str,
    overtime_gross: &'static str,
    overtime_tax: &'static str,
    overtime_net: &'static str,
    bonuses: &'static str,
    night: &'static str,
    sgc: &'static str,
    performance: &'static str,
    card: &'static str,
    roulette: &'static str,
    commitment: &'static str,
    total_bonuses: &'static str,
    totals: &'static str,
    non_overtime_gross: &'static str,
    gross_total: &'static str,
    total_deductions: &'static str,
    note: &'static str,
}

const ENGLISH: Labels = Labels {
    headline: "ESTIMATED NET SALARY",
    breakdown: "Breakdown",
    base: "Base (gross)",
    ssc: "SSC (monthly, on base)",
    income_tax: "Income tax (excl. overtime, monthly estimate)",
    overtime_gross: "Overtime gross",
    overtime_tax: "Overtime tax (25%)",
    overtime_net: "Overtime net",
    bonuses: "Bonuses",
    night: "Night bonus",
    sgc: "SGC bonus",
    performance: "Performance bonus",
    card: "Card bonus",
    roulette: "Roulette bonus",
    commitment: "Commitment bonus",
    total_bonuses: "Total bonuses",
    totals: "Totals",
    non_overtime_gross: "Non-overtime gross (base + bonuses)",
    gross_total: "Total gross",
    total_deductions: "Total deductions",
    note: "Note: this is an estimate. Actual payslips may differ slightly by employer.",
};

const TURKISH: Labels = Labels {
    headline: "TAHMİNİ NET MAAŞ",
    breakdown: "Döküm",
    base: "Base (brüt)",
    ssc: "SSC (aylık, base üstünden)",
    income_tax: "Gelir vergisi (overtime hariç, aylık tahmini)",
    overtime_gross: "Overtime brüt",
    overtime_tax: "Overtime vergi (%25)",
    overtime_net: "Overtime net",
    bonuses: "Bonuslar",
    night: "Gece bonusu",
    sgc: "SGC bonusu",
    performance: "Performans bonusu",
    card: "Kart bonusu",
    roulette: "Rulet bonusu",
    commitment: "Commitment bonusu",
    total_bonuses: "Toplam bonus",
    totals: "Genel Toplam",
    non_overtime_gross: "Non-overtime brüt (base+bonus)",
    gross_total: "Toplam brüt",
    total_deductions: "Toplam kesinti",
    note: "Not: Bu sonuç tahminidir. Bordro hesapları işyerine göre küçük farklılık gösterebilir.",
};

impl ReportLanguage {
    fn labels(&self) -> &'static Labels {
        match self {
            Self::En => &ENGLISH,
            Self::Tr => &TURKISH,
        }
    }

    /// Percentage as written in this language: `20%` or `%20`.
    fn tier_label(&self, tier: CommitmentTier) -> String {
        match self {
            Self::En => format!("{}%", tier.percent()),
            Self::Tr => format!("%{}", tier.percent()),
        }
    }
}

/// One labeled amount in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub label: String,
    pub amount: Decimal,
}

/// A titled group of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<ReportLine>,
}

/// The rendered result of one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    pub headline: ReportLine,
    pub sections: Vec<ReportSection>,
    pub note: String,
}

fn line(label: impl Into<String>, amount: Decimal) -> ReportLine {
    ReportLine {
        label: label.into(),
        amount,
    }
}

impl PayrollReport {
    pub fn new(b: &PayrollBreakdown, language: ReportLanguage) -> Self {
        let l = language.labels();

        let breakdown = ReportSection {
            title: l.breakdown.to_string(),
            lines: vec![
                line(l.base, b.base_gross),
                line(l.ssc, b.ssc_monthly),
                line(l.income_tax, b.monthly_tax),
                line(l.overtime_gross, b.overtime_gross),
                line(l.overtime_tax, b.overtime_tax),
                line(l.overtime_net, b.overtime_net),
            ],
        };
        let bonuses = ReportSection {
            title: l.bonuses.to_string(),
            lines: vec![
                line(l.night, b.night_bonus),
                line(l.sgc, b.sgc_bonus),
                line(l.performance, b.performance_bonus),
                line(l.card, b.card_bonus),
                line(l.roulette, b.roulette_bonus),
                line(
                    format!("{} ({})", l.commitment, language.tier_label(b.commitment_tier)),
                    b.commitment_bonus,
                ),
                line(l.total_bonuses, b.total_bonuses),
            ],
        };
        let totals = ReportSection {
            title: l.totals.to_string(),
            lines: vec![
                line(l.non_overtime_gross, b.non_overtime_gross),
                line(l.gross_total, b.gross_total),
                line(l.total_deductions, b.total_deductions),
            ],
        };

        Self {
            headline: line(l.headline, b.net_total),
            sections: vec![breakdown, bonuses, totals],
            note: l.note.to_string(),
        }
    }
}

impl fmt::Display for PayrollReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.headline.label, format_eur(self.headline.amount))?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "## {}", section.title)?;
            for l in &section.lines {
                writeln!(f, "- {}: {}", l.label, format_eur(l.amount))?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.note)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::engine::PayrollEngine;
    use crate::models::{CommitmentTier, PayrollInput};
    use crate::policy::PayrollPolicy;

    fn breakdown() -> PayrollBreakdown {
        let policy = PayrollPolicy::default();
        let mut input = PayrollInput::new(dec!(2000), 1995);
        input.commitment_tier = CommitmentTier::Twenty;
        PayrollEngine::new(&policy).compute(&input).unwrap()
    }

    #[test]
    fn english_report_lists_every_section() {
        let report = PayrollReport::new(&breakdown(), ReportLanguage::En);

        assert_eq!(report.headline.label, "ESTIMATED NET SALARY");
        let titles: Vec<_> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Breakdown", "Bonuses", "Totals"]);
        assert_eq!(report.sections[1].lines.len(), 7);
    }

    #[test]
    fn commitment_line_names_the_tier() {
        let report = PayrollReport::new(&breakdown(), ReportLanguage::Tr);

        assert_eq!(report.sections[1].lines[5].label, "Commitment bonusu (%20)");
    }

    #[test]
    fn english_commitment_line_puts_percent_after() {
        let report = PayrollReport::new(&breakdown(), ReportLanguage::En);

        assert_eq!(report.sections[1].lines[5].label, "Commitment bonus (20%)");
    }

    #[test]
    fn rendered_text_uses_currency_format() {
        let text = PayrollReport::new(&breakdown(), ReportLanguage::En).to_string();

        assert!(text.starts_with("ESTIMATED NET SALARY: €1,633.35\n"));
        assert!(text.contains("- SSC (monthly, on base): €199.98\n"));
        assert!(text.contains("- Total deductions: €366.65\n"));
        assert!(text.ends_with("may differ slightly by employer."));
    }

    #[test]
    fn turkish_headline() {
        let text = PayrollReport::new(&breakdown(), ReportLanguage::Tr).to_string();

        assert!(text.starts_with("TAHMİNİ NET MAAŞ: €1,633.35"));
        assert!(text.contains("## Döküm"));
    }

    #[test]
    fn language_parses_codes() {
        assert_eq!("TR".parse::<ReportLanguage>(), Ok(ReportLanguage::Tr));
        assert_eq!("english".parse::<ReportLanguage>(), Ok(ReportLanguage::En));
        assert!("de".parse::<ReportLanguage>().is_err());
    }
}
