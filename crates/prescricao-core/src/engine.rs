//! Deadline engine: base term, milestone recount, and the outcome of one evaluation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::{CUTOFF, INTERCURRENT_DAYS, add_years};
use crate::case::{CaseInput, MaterialBasis};
use crate::milestones;
use crate::regime::{PRIOR_TERM_YEARS, Regime, prior_regime_milestones};

/// Terminal state of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    NotBarred,
    Barred,
    /// Stalled for three years or more; overrides the base deadline outcome.
    IntercurrentBarred,
    PriorRegimeBarred,
    OutOfScope,
}

impl Situation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotBarred => "not_barred",
            Self::Barred => "barred",
            Self::IntercurrentBarred => "intercurrent_barred",
            Self::PriorRegimeBarred => "prior_regime_barred",
            Self::OutOfScope => "out_of_scope",
        }
    }

    pub fn is_barred(&self) -> bool {
        matches!(
            self,
            Self::Barred | Self::IntercurrentBarred | Self::PriorRegimeBarred
        )
    }
}

/// Length of the limitation period that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseTerm {
    /// Five years, new regime.
    Quinquennial,
    /// Two years from the cutoff.
    Biennial,
    /// Criminal period; always prevails over the administrative one.
    Criminal(u8),
    /// Five years under the prior regime.
    PriorQuinquennial,
}

impl BaseTerm {
    /// Administrative or criminal term for a running regime.
    fn for_regime(regime: Regime, criminal_years: Option<u8>) -> Self {
        match criminal_years.filter(|y| *y > 0) {
            Some(years) => Self::Criminal(years),
            None if regime == Regime::NewRegime => Self::Quinquennial,
            None => Self::Biennial,
        }
    }

    pub fn years(&self) -> i32 {
        match self {
            Self::Quinquennial | Self::PriorQuinquennial => 5,
            Self::Biennial => 2,
            Self::Criminal(years) => i32::from(*years),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Quinquennial => "quinquenal".to_string(),
            Self::Biennial => "bienal (transição)".to_string(),
            Self::Criminal(years) => format!("prazo penal ({years} anos)"),
            Self::PriorQuinquennial => "quinquenal (regime anterior)".to_string(),
        }
    }
}

/// What the effective start date stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartBasis {
    /// The informed material term (act, cessation, damage event...).
    Material(MaterialBasis),
    /// The fixed transition start.
    Cutoff,
    /// Awareness date, for the prior regime.
    Awareness,
}

/// Outcome of one evaluation, for the case or for one party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub regime: Regime,
    pub situation: Situation,
    /// Start of the term before milestones are applied.
    pub effective_start: Option<NaiveDate>,
    pub start_basis: Option<StartBasis>,
    /// Start after the latest qualifying milestone.
    pub recounted_start: Option<NaiveDate>,
    pub final_deadline: Option<NaiveDate>,
    pub base_term: Option<BaseTerm>,
    /// Milestones that fell inside the governing period, ascending.
    pub considered_milestones: Vec<NaiveDate>,
    pub interruptions_applied: bool,
    /// Stall length, when the intercurrent check ran.
    pub intercurrent_gap_days: Option<i64>,
    /// The prior-regime deadline lands after the cutoff, either because the
    /// regime was forced or because a party's own summons restarted the period.
    pub deadline_after_cutoff: bool,
}

impl EvaluationResult {
    fn out_of_scope() -> Self {
        Self {
            regime: Regime::OutOfScope,
            situation: Situation::OutOfScope,
            effective_start: None,
            start_basis: None,
            recounted_start: None,
            final_deadline: None,
            base_term: None,
            considered_milestones: Vec::new(),
            interruptions_applied: false,
            intercurrent_gap_days: None,
            deadline_after_cutoff: false,
        }
    }

    pub fn base_term_label(&self) -> Option<String> {
        self.base_term.map(|t| t.label())
    }
}

/// Compute the deadline and situation under `regime`.
///
/// `today` is read once by the caller and held constant for the whole pass.
/// Every combination of inputs yields a result.
pub fn compute_deadline(
    regime: Regime,
    case: &CaseInput,
    general: &[NaiveDate],
    subjective: &[NaiveDate],
    today: NaiveDate,
) -> EvaluationResult {
    let candidates = milestones::merge(general, subjective);
    match regime {
        Regime::OutOfScope => EvaluationResult::out_of_scope(),
        Regime::PreLawConsummated => prior_regime(case, &candidates),
        Regime::NewRegime | Regime::Transition => running_term(regime, case, &candidates, today),
    }
}

fn prior_regime(case: &CaseInput, candidates: &[NaiveDate]) -> EvaluationResult {
    let start = case.awareness();
    let mut window = prior_regime_milestones(start, candidates);
    window.sort_unstable();
    let reduced = milestones::reduce(start, &window);
    let deadline = add_years(reduced.start, PRIOR_TERM_YEARS);

    let after_cutoff = deadline > CUTOFF;
    if after_cutoff {
        warn!(%deadline, cutoff = %CUTOFF, "prior-regime deadline falls after the cutoff");
    }

    EvaluationResult {
        regime: Regime::PreLawConsummated,
        situation: Situation::PriorRegimeBarred,
        effective_start: Some(start),
        start_basis: Some(StartBasis::Awareness),
        recounted_start: Some(reduced.start),
        final_deadline: Some(deadline),
        base_term: Some(BaseTerm::PriorQuinquennial),
        considered_milestones: window,
        interruptions_applied: reduced.applied,
        intercurrent_gap_days: None,
        deadline_after_cutoff: after_cutoff,
    }
}

fn running_term(
    regime: Regime,
    case: &CaseInput,
    candidates: &[NaiveDate],
    today: NaiveDate,
) -> EvaluationResult {
    let term = BaseTerm::for_regime(regime, case.criminal_term_years);
    let (start, basis) = if regime == Regime::NewRegime {
        (
            case.material_term_date,
            StartBasis::Material(case.material_basis),
        )
    } else {
        (CUTOFF, StartBasis::Cutoff)
    };

    let considered = milestones::qualifying(start, candidates);
    let reduced = milestones::reduce(start, &considered);
    let deadline = add_years(reduced.start, term.years());

    let gap = case.intercurrent.map(|check| check.gap_days(today));
    let situation = match gap {
        Some(days) if days >= INTERCURRENT_DAYS => Situation::IntercurrentBarred,
        _ if today >= deadline => Situation::Barred,
        _ => Situation::NotBarred,
    };
    debug!(
        regime = regime.as_str(),
        term = term.years(),
        %deadline,
        situation = situation.as_str(),
        "deadline computed"
    );

    EvaluationResult {
        regime,
        situation,
        effective_start: Some(start),
        start_basis: Some(basis),
        recounted_start: Some(reduced.start),
        final_deadline: Some(deadline),
        base_term: Some(term),
        considered_milestones: considered,
        interruptions_applied: reduced.applied,
        intercurrent_gap_days: gap,
        deadline_after_cutoff: false,
    }
}
