//! Intertemporal classification: which regime governs a case.
//!
//! Decision order, first match wins:
//!
//! 1. A decision final before the cutoff is out of scope.
//! 2. A material term on or after the pre-regime threshold falls under the
//!    new regime, whatever the awareness or filing date.
//! 3. Older facts are tested against the prior five-year regime, counted
//!    from awareness and restarted by milestones up to the cutoff. If that
//!    period had elapsed by the cutoff the claim was already barred,
//!    otherwise the two-year transition applies.
//!
//! The filing date never gates the choice on its own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{CUTOFF, PRE_REGIME_THRESHOLD, add_years};
use crate::case::CaseInput;
use crate::milestones;

/// Prior-regime limitation period in years.
pub const PRIOR_TERM_YEARS: i32 = 5;

/// The four mutually exclusive intertemporal regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Five years from the material term date.
    NewRegime,
    /// Two years from the cutoff.
    Transition,
    /// Barred under the prior five-year regime before the cutoff.
    PreLawConsummated,
    /// Decision already final before the cutoff; the statute does not reach it.
    OutOfScope,
}

impl Regime {
    pub const ALL: [Regime; 4] = [
        Self::NewRegime,
        Self::Transition,
        Self::PreLawConsummated,
        Self::OutOfScope,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewRegime => "new_regime",
            Self::Transition => "transition",
            Self::PreLawConsummated => "pre_law_consummated",
            Self::OutOfScope => "out_of_scope",
        }
    }
}

/// Milestones that restart the prior-regime period: from awareness up to the cutoff.
pub fn prior_regime_milestones(awareness: NaiveDate, milestones: &[NaiveDate]) -> Vec<NaiveDate> {
    milestones
        .iter()
        .copied()
        .filter(|d| *d >= awareness && *d <= CUTOFF)
        .collect()
}

/// Whether the prior five-year period had fully elapsed by the cutoff.
///
/// Without an awareness date consumption cannot be established, so this
/// returns `false`. Awareness after the cutoff is never consumed.
pub fn pre_law_consumed(awareness: Option<NaiveDate>, milestones: &[NaiveDate]) -> bool {
    let Some(awareness) = awareness else {
        return false;
    };
    let window = prior_regime_milestones(awareness, milestones);
    let reduced = milestones::reduce(awareness, &window);
    let expiry = add_years(reduced.start, PRIOR_TERM_YEARS);
    debug!(%awareness, restarted = %reduced.start, %expiry, "prior-regime consumption test");
    expiry <= CUTOFF
}

/// Suggest the governing regime. Advisory only: callers may override it.
pub fn classify(case: &CaseInput, general_milestones: &[NaiveDate]) -> Regime {
    let regime = if case.finalized_before_cutoff {
        Regime::OutOfScope
    } else if case.material_term_date >= PRE_REGIME_THRESHOLD {
        Regime::NewRegime
    } else if pre_law_consumed(Some(case.awareness()), general_milestones) {
        Regime::PreLawConsummated
    } else {
        Regime::Transition
    };
    debug!(regime = regime.as_str(), material_term = %case.material_term_date, "regime suggested");
    regime
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn case(material: NaiveDate, awareness: NaiveDate) -> CaseInput {
        let mut case = CaseInput::punitive(material);
        case.filing_date = awareness;
        case.awareness_date = Some(awareness);
        case
    }

    #[test]
    fn consumption_boundary_without_milestones() {
        // Exactly five years before the cutoff is consumed on the cutoff itself.
        assert!(pre_law_consumed(Some(d(2019, 7, 18)), &[]));
        assert!(!pre_law_consumed(Some(d(2019, 7, 19)), &[]));
        for awareness in [d(2015, 1, 1), d(2018, 12, 31), d(2019, 7, 17), d(2020, 1, 1)] {
            assert_eq!(
                pre_law_consumed(Some(awareness), &[]),
                add_years(awareness, 5) <= CUTOFF
            );
        }
    }

    #[test]
    fn missing_awareness_is_not_consumed() {
        assert!(!pre_law_consumed(None, &[d(2018, 1, 1)]));
    }

    #[test]
    fn awareness_after_cutoff_is_not_consumed() {
        assert!(!pre_law_consumed(Some(d(2024, 12, 12)), &[]));
        assert!(!pre_law_consumed(Some(d(2024, 12, 12)), &[d(2025, 1, 1)]));
    }

    #[test]
    fn pre_cutoff_milestone_restarts_prior_period() {
        // 2017 + 5 = 2022 would be consumed; a 2020 milestone pushes it to 2025.
        assert!(pre_law_consumed(Some(d(2017, 6, 10)), &[]));
        assert!(!pre_law_consumed(Some(d(2017, 6, 10)), &[d(2020, 3, 1)]));
    }

    #[test]
    fn milestones_outside_prior_window_are_ignored() {
        let milestones = [d(2016, 1, 1), d(2025, 1, 1)];
        assert!(pre_law_consumed(Some(d(2017, 6, 10)), &milestones));
        assert_eq!(
            prior_regime_milestones(
                d(2017, 6, 10),
                &[d(2016, 1, 1), d(2024, 7, 18), d(2025, 1, 1)]
            ),
            vec![d(2024, 7, 18)]
        );
    }

    #[test]
    fn finalized_decision_is_out_of_scope() {
        let mut c = case(d(2022, 1, 1), d(2022, 1, 1));
        c.finalized_before_cutoff = true;
        assert_eq!(classify(&c, &[]), Regime::OutOfScope);
    }

    #[test]
    fn recent_fact_is_new_regime_regardless_of_awareness() {
        let c = case(d(2021, 11, 3), d(2021, 11, 3));
        assert_eq!(classify(&c, &[]), Regime::NewRegime);
        let c = case(PRE_REGIME_THRESHOLD, d(2019, 1, 1));
        assert_eq!(classify(&c, &[]), Regime::NewRegime);
    }

    #[test]
    fn old_fact_with_late_awareness_is_transition() {
        let c = case(d(2016, 6, 15), d(2024, 12, 12));
        assert_eq!(classify(&c, &[]), Regime::Transition);
    }

    #[test]
    fn old_fact_with_early_awareness_is_consummated() {
        let c = case(d(2015, 5, 10), d(2017, 6, 10));
        assert_eq!(classify(&c, &[]), Regime::PreLawConsummated);
    }

    #[test]
    fn filing_date_alone_does_not_gate() {
        // Filed before the cutoff, but awareness recorded later.
        let mut c = case(d(2016, 6, 15), d(2024, 8, 1));
        c.filing_date = d(2018, 1, 1);
        assert_eq!(classify(&c, &[]), Regime::Transition);
    }

    #[test]
    fn classification_is_exclusive() {
        let awarenesses = [d(2015, 1, 1), d(2019, 7, 18), d(2024, 8, 1)];
        let materials = [d(2014, 1, 1), d(2021, 7, 17), d(2021, 7, 18), d(2023, 1, 1)];
        for finalized in [false, true] {
            for &a in &awarenesses {
                for &m in &materials {
                    let mut c = case(m, a);
                    c.finalized_before_cutoff = finalized;
                    let r = classify(&c, &[]);
                    assert_eq!(Regime::ALL.iter().filter(|x| **x == r).count(), 1);
                }
            }
        }
    }
}
